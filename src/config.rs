//! Run configuration.
//!
//! Everything that used to be a fixed path or file name is a field here, so
//! several books can be processed with one binary. Values come from the
//! defaults, then an optional TOML file, then command-line flags.
//!
//! ```toml
//! input_dir = "html/input"
//! output_dir = "html/output"
//! library = "vendor/jquery-1.6.2.min.js"
//! tier = "slow"
//!
//! [tidy]
//! wrap = 100
//!
//! [reflow]
//! table_border_limit = 2
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Rendering performance of the environment that will display the book.
///
/// Slow hosts get a confirmation banner instead of an automatic reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Slow,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Slow => "slow",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Tier::Standard),
            "slow" => Ok(Tier::Slow),
            other => Err(format!("unknown tier `{other}` (expected `standard` or `slow`)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the converter's raw HTML.
    pub input_dir: PathBuf,
    /// Directory the tidied, script-injected page is written to.
    pub output_dir: PathBuf,
    pub input_name: String,
    pub output_name: String,
    /// UI library copied next to the page and loaded before the engine.
    pub library: PathBuf,
    /// Asset directory, relative to the output page.
    pub script_dir: String,
    /// File name of the generated engine script.
    pub engine_script: String,
    pub tier: Tier,
    pub tidy: TidyConfig,
    pub reflow: ReflowConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("html/input"),
            output_dir: PathBuf::from("html/input"),
            input_name: "dummy.html".to_string(),
            output_name: "book.html".to_string(),
            library: PathBuf::from("jquery-1.6.2.min.js"),
            script_dir: "js".to_string(),
            engine_script: "fixup.js".to_string(),
            tier: Tier::Standard,
            tidy: TidyConfig::default(),
            reflow: ReflowConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TidyConfig {
    /// Skip tidy and copy the input through unchanged.
    pub enabled: bool,
    pub bin: String,
    /// Line wrap column.
    pub wrap: u32,
    /// Character encoding flag, passed as `-<encoding>`.
    pub encoding: String,
}

impl Default for TidyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bin: "tidy".to_string(),
            wrap: 120,
            encoding: "utf8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReflowConfig {
    /// How many leading tables lose their `border` attribute.
    pub table_border_limit: usize,
}

impl Config {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn input_path(&self) -> PathBuf {
        self.input_dir.join(&self.input_name)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    /// File name the library is referenced by in the page.
    pub fn library_name(&self) -> String {
        self.library
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.library.display().to_string())
    }

    /// `src` attributes of the injected scripts, library first.
    pub fn script_srcs(&self) -> [String; 2] {
        [
            format!("{}/{}", self.script_dir, self.library_name()),
            format!("{}/{}", self.script_dir, self.engine_script),
        ]
    }
}
