//! Offline preparation of a converted book page.
//!
//! ```text
//! input_dir/input_name ──tidy──▶ output_dir/output_name ──inject──▶ (same file)
//!                                                        └─prerender─▶
//! ```

mod inject;
pub mod tidy;

pub use inject::{ENGINE_SCRIPT, inject_file, inject_scripts, prerender_file, provision_assets};

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::Result;

/// What the output page does with the reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Load the engine script and reflow in the browser.
    #[default]
    Scripted,
    /// Apply the reflow now and write a static page.
    Prerendered,
}

/// Run the whole preparation. Returns the path of the written page.
pub fn run(config: &Config, mode: Mode) -> Result<PathBuf> {
    let input = config.input_path();
    let output = config.output_path();
    info!(input = %input.display(), output = %output.display(), ?mode, "preparing book page");

    fs::create_dir_all(&config.output_dir)?;
    tidy::format(&config.tidy, &input, &output)?;

    match mode {
        Mode::Scripted => inject_file(&output, config)?,
        Mode::Prerendered => prerender_file(&output, &config.reflow)?,
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TidyConfig;

    fn config_in(dir: &std::path::Path) -> Config {
        let input_dir = dir.join("input");
        fs::create_dir(&input_dir).unwrap();
        fs::write(
            input_dir.join("dummy.html"),
            "<html><head></head><body><div><h3>Warning</h3></div></body></html>",
        )
        .unwrap();
        let library = dir.join("jquery-1.6.2.min.js");
        fs::write(&library, "/* jquery */").unwrap();

        Config {
            input_dir,
            output_dir: dir.join("output"),
            library,
            tidy: TidyConfig {
                enabled: false,
                ..TidyConfig::default()
            },
            ..Config::default()
        }
    }

    #[test]
    fn test_scripted_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let page = run(&config, Mode::Scripted).unwrap();
        assert_eq!(page, dir.path().join("output/book.html"));

        let html = fs::read_to_string(&page).unwrap();
        assert!(html.contains(r#"<script type="text/javascript" src="js/fixup.js""#));
        assert!(html.contains(r#"<body style="display:none">"#));
        assert!(dir.path().join("output/js/fixup.js").exists());
    }

    #[test]
    fn test_prerendered_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let page = run(&config, Mode::Prerendered).unwrap();
        let html = fs::read_to_string(page).unwrap();
        assert!(html.contains(r#"<div class="warn"><h3>Warning</h3></div>"#));
        assert!(!dir.path().join("output/js").exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            input_dir: dir.path().join("nowhere"),
            output_dir: dir.path().to_path_buf(),
            tidy: TidyConfig {
                enabled: false,
                ..TidyConfig::default()
            },
            ..Config::default()
        };
        assert!(run(&config, Mode::Scripted).is_err());
    }
}
