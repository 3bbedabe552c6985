//! Error types for query construction.
//!
//! Every error here is detected synchronously while a query is being built.
//! None of them is transient, so callers should treat them as
//! request-construction failures and never dispatch the request.

use thiserror::Error;

use crate::operation::OperationKind;

/// Errors raised by the query builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Too many paths were passed to a single `select` call.
    #[error("selection limit exceeded: {count} paths given, fewer than {limit} allowed")]
    SelectionLimitExceeded {
        /// Number of paths the caller passed.
        count: usize,
        /// The configured limit.
        limit: usize,
    },

    /// A selection path nests deeper than one level.
    #[error("invalid selection: {field_key_path}")]
    InvalidSelection {
        /// The offending path, verbatim.
        field_key_path: String,
    },

    /// Two operations on the same field cannot be combined yet.
    #[error("unsupported combination of operations: {first} and {second}")]
    UnsupportedCombination {
        /// Operation already applied to the field.
        first: OperationKind,
        /// Operation being added.
        second: OperationKind,
    },

    /// A filter field path lacks the `fields.` or `sys.` prefix.
    ///
    /// Only raised when strict field paths are enabled.
    #[error("invalid field path: {field_path} (expected a `fields.` or `sys.` prefix)")]
    InvalidFieldPath {
        /// The offending path, verbatim.
        field_path: String,
    },
}

/// Result type for query builder operations.
pub type QueryResult<T> = Result<T, QueryError>;
