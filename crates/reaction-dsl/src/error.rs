//! Error types for the expression-builder core.

use thiserror::Error;

/// Errors raised by misuse of the builder protocol.
///
/// All of these are programmer errors: construction fails fast at the point
/// of misuse and the error propagates to the authoring caller. Nothing is
/// retried, swallowed, or logged-and-continued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    /// An expression set was constructed with fewer than two members.
    #[error("an expression set needs at least two members, got {0}")]
    TooFewMembers(usize),

    /// A chaining operation was attempted on an expression set.
    #[error("`{operation}` is not supported on an expression set")]
    UnsupportedSetOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// An attribute name used the reserved internal prefix.
    #[error("attribute name `{0}` is reserved for internal use")]
    ReservedAttribute(String),

    /// A union was attempted with a value that is not a symbolic reference.
    #[error("cannot union a chain with a value of kind `{0}`")]
    IncompatibleUnion(&'static str),
}

/// Result type for builder operations.
pub type DslResult<T> = std::result::Result<T, DslError>;
