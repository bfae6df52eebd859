//! Tween engine error types
//!
//! Creating and ticking tweens never fails; these errors come from loading
//! configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum TweenError {
    /// Failed to read a configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`TweenConfig`](crate::TweenConfig)
    #[error("Failed to parse tween config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize tween config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration parsed but holds an unusable value
    #[error("Invalid tween config: {0}")]
    InvalidConfig(String),
}

/// Result type for tween configuration operations
pub type Result<T> = std::result::Result<T, TweenError>;
