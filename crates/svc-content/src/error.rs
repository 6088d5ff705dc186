//! Error types for svc-content

use std::path::PathBuf;

/// Result type for svc-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the crate's boundaries: reading records and settings.
///
/// Loading, exporting and mutating block collections never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse settings at {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to render settings: {0}")]
    TomlRender(#[from] toml::ser::Error),

    #[error("Invalid service record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
