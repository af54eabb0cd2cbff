//! Error types for booktidy operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing a book page.
///
/// Failures of the external tidy tool are not represented here: they are
/// logged and swallowed, since tidy reports warnings through its exit code.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("asset {}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("missing required element: <{0}>")]
    MissingElement(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
