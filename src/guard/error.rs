//! Error types for the guard.

use thiserror::Error;

use super::metadata::ObjectRole;

/// Failure to decode an object state into metadata.
///
/// Never downgraded to "not managed": a request whose object states cannot be
/// read is answered with an error verdict, and the underlying parse detail is
/// preserved for debugging.
#[derive(Error, Debug)]
#[error("failed to decode {role} object state: {source}")]
pub struct DecodeError {
    /// Which object state failed to decode.
    pub role: ObjectRole,
    /// The underlying parse failure.
    #[source]
    pub source: serde_json::Error,
}

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, DecodeError>;
