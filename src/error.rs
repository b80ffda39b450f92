//! Error types for the sheetchart binary

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read {path}: file too large ({size} bytes, max {max})")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
