//! Error types for mastery-core.

use thiserror::Error;

/// Result type alias using KeyError.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors for a malformed record identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("user id must not be nil")]
    NilUserId,

    #[error("paper id must not be nil")]
    NilPaperId,

    #[error("concept id must not be empty")]
    EmptyConceptId,
}
