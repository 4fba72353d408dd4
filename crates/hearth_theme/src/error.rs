//! Error types for the theme engine edges
//!
//! The engine core (compositing, cascade, compilation, application) is total
//! and never fails. Errors only arise when loading configuration from disk or
//! parsing user-supplied identifiers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur at the theme engine boundary
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML theme: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON theme: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported theme format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("unknown element identifier: {0}")]
    UnknownElement(String),

    #[error("invalid opacity {0}: expected a number")]
    InvalidOpacity(String),

    #[error("invalid color mode: {0} (expected light or dark)")]
    InvalidMode(String),
}

/// Result type for theme engine operations
pub type Result<T> = std::result::Result<T, ThemeError>;
