//! Runs the external HTML tidy tool.
//!
//! Tidy exits non-zero for plain warnings, so the exit status is logged and
//! otherwise ignored. Whatever tidy printed becomes the output page; when it
//! printed nothing (or could not be started) the input is copied through so
//! the rest of the run still has a page to work on.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::TidyConfig;
use crate::error::Result;

/// Format `input` into `output`.
///
/// `input` and `output` may be the same file.
pub fn format(config: &TidyConfig, input: &Path, output: &Path) -> Result<()> {
    if !config.enabled {
        debug!(input = %input.display(), "tidy disabled, copying input");
        return copy_through(input, output);
    }

    let bin = match which::which(&config.bin) {
        Ok(bin) => bin,
        Err(err) => {
            warn!(bin = %config.bin, "tidy not found ({err}), copying input unchanged");
            return copy_through(input, output);
        }
    };

    let result = Command::new(&bin)
        .arg("-i")
        .arg("-wrap")
        .arg(config.wrap.to_string())
        .arg(format!("-{}", config.encoding))
        .arg(input)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    let output_bytes = match result {
        Ok(out) => {
            debug!(status = %out.status, bytes = out.stdout.len(), "tidy finished");
            out.stdout
        }
        Err(err) => {
            warn!(bin = %bin.display(), "failed to run tidy: {err}");
            Vec::new()
        }
    };

    if output_bytes.is_empty() {
        warn!(input = %input.display(), "tidy produced no output, copying input unchanged");
        return copy_through(input, output);
    }
    fs::write(output, output_bytes)?;
    Ok(())
}

fn copy_through(input: &Path, output: &Path) -> Result<()> {
    if same_file(input, output) {
        return Ok(());
    }
    fs::copy(input, output)?;
    Ok(())
}

pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "<html><body><p>raw</p></body></html>";

    #[test]
    fn test_disabled_copies_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dummy.html");
        let output = dir.path().join("book.html");
        fs::write(&input, RAW).unwrap();

        let config = TidyConfig {
            enabled: false,
            ..TidyConfig::default()
        };
        format(&config, &input, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), RAW);
    }

    #[test]
    fn test_missing_binary_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dummy.html");
        let output = dir.path().join("book.html");
        fs::write(&input, RAW).unwrap();

        let config = TidyConfig {
            bin: "booktidy-no-such-tidy".to_string(),
            ..TidyConfig::default()
        };
        format(&config, &input, &output).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), RAW);
    }

    #[test]
    fn test_same_path_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("book.html");
        fs::write(&page, RAW).unwrap();

        let config = TidyConfig {
            enabled: false,
            ..TidyConfig::default()
        };
        format(&config, &page, &page).unwrap();
        assert_eq!(fs::read_to_string(&page).unwrap(), RAW);
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("fake-tidy");
        fs::write(
            &fake,
            "#!/bin/sh\necho \"<html><body>tidied $1 $2 $3 $4</body></html>\"\necho warning >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

        let input = dir.path().join("dummy.html");
        let output = dir.path().join("book.html");
        fs::write(&input, RAW).unwrap();

        let config = TidyConfig {
            bin: fake.display().to_string(),
            ..TidyConfig::default()
        };
        format(&config, &input, &output).unwrap();

        let tidied = fs::read_to_string(&output).unwrap();
        assert!(tidied.contains("tidied -i -wrap 120 -utf8"));
        assert!(!tidied.contains("warning"));
    }
}
