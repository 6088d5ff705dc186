//! Error types for svc-blocks

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when reading block identifiers or names from outside input.
///
/// Conversion itself never fails; these only surface at parsing boundaries
/// such as `FromStr` impls and JSON decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Unknown content kind: {0}")]
    UnknownContentKind(String),

    #[error("Invalid block id: {0}")]
    InvalidBlockId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
