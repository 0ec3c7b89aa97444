use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by reading construction and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// NaN or infinite reading.
    #[error("toxicity reading must be finite, got {0}")]
    NonFiniteReading(f64),
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for `SimulationConfig`.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Parsed but semantically invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
