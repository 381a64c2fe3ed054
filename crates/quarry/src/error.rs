//! # Error Types
//!
//! The per-tick path has no error flow: missing targets, empty stock and
//! blocked placements degrade to no-ops. Errors exist only where the
//! simulation is set up.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The starting inventory does not fit the configured capacity.
    #[error("invalid starting inventory: {0}")]
    StartingInventory(#[from] quarry_items::ItemError),
}

/// Result type for setup operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
