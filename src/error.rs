//! Error type shared by every engine operation.

/// Errors raised by ranking, density estimation, archives and replacement.
///
/// The first three variants describe invalid input shapes and are caller
/// errors. [`ParetoError::InvariantViolation`] signals an engine bug; callers
/// should treat it as unrecoverable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParetoError {
    #[error("objective vector has {found} values, expected {expected}")]
    ObjectiveCountMismatch { expected: usize, found: usize },

    #[error("solutions must have at least one objective")]
    NoObjectives,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("engine invariant violated: {0}")]
    InvariantViolation(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ParetoError>;
