//! Filter operations and their wire encodings.
//!
//! Each [`QueryOperation`] contributes a suffix to the field's parameter key
//! and a value string. For example `fields.tags` with
//! `QueryOperation::HasAll(vec!["a", "b"])` becomes `fields.tags[all]=a,b`.
//!
//! | Operation | Suffix | Value |
//! |-----------|--------|-------|
//! | `Equals` | (none) | the string |
//! | `DoesNotEqual` | `[ne]` | the string |
//! | `HasAll` | `[all]` | comma-joined |
//! | `Includes` | `[in]` | comma-joined |
//! | `Excludes` | `[nin]` | comma-joined |
//! | `Exists` | `[exists]` | `true` / `false` |

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{QueryError, QueryResult};

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum QueryOperation {
    /// Field equals the value.
    Equals(String),
    /// Field does not equal the value.
    DoesNotEqual(String),
    /// Field contains all of the values.
    HasAll(Vec<String>),
    /// Field matches any of the values.
    Includes(Vec<String>),
    /// Field matches none of the values.
    Excludes(Vec<String>),
    /// Field is present (`true`) or absent (`false`).
    Exists(bool),
}

/// The payload-free tag of a [`QueryOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// See [`QueryOperation::Equals`].
    Equals,
    /// See [`QueryOperation::DoesNotEqual`].
    DoesNotEqual,
    /// See [`QueryOperation::HasAll`].
    HasAll,
    /// See [`QueryOperation::Includes`].
    Includes,
    /// See [`QueryOperation::Excludes`].
    Excludes,
    /// See [`QueryOperation::Exists`].
    Exists,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Equals => write!(f, "equals"),
            OperationKind::DoesNotEqual => write!(f, "ne"),
            OperationKind::HasAll => write!(f, "all"),
            OperationKind::Includes => write!(f, "in"),
            OperationKind::Excludes => write!(f, "nin"),
            OperationKind::Exists => write!(f, "exists"),
        }
    }
}

impl OperationKind {
    /// Returns the suffix appended to the field's parameter key.
    pub fn suffix(&self) -> &'static str {
        match self {
            OperationKind::Equals => "",
            OperationKind::DoesNotEqual => "[ne]",
            OperationKind::HasAll => "[all]",
            OperationKind::Includes => "[in]",
            OperationKind::Excludes => "[nin]",
            OperationKind::Exists => "[exists]",
        }
    }
}

impl QueryOperation {
    /// Convenience constructor for [`QueryOperation::HasAll`].
    pub fn has_all<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryOperation::HasAll(values.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for [`QueryOperation::Includes`].
    pub fn includes<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryOperation::Includes(values.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for [`QueryOperation::Excludes`].
    pub fn excludes<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryOperation::Excludes(values.into_iter().map(Into::into).collect())
    }

    /// Returns the operation's tag.
    pub fn kind(&self) -> OperationKind {
        match self {
            QueryOperation::Equals(_) => OperationKind::Equals,
            QueryOperation::DoesNotEqual(_) => OperationKind::DoesNotEqual,
            QueryOperation::HasAll(_) => OperationKind::HasAll,
            QueryOperation::Includes(_) => OperationKind::Includes,
            QueryOperation::Excludes(_) => OperationKind::Excludes,
            QueryOperation::Exists(_) => OperationKind::Exists,
        }
    }

    /// Returns the suffix appended to the field's parameter key.
    pub fn suffix(&self) -> &'static str {
        self.kind().suffix()
    }

    /// Returns the wire value for this operation's payload.
    ///
    /// An empty set encodes to the empty string; it is not rejected.
    pub fn values(&self) -> String {
        match self {
            QueryOperation::Equals(value) | QueryOperation::DoesNotEqual(value) => value.clone(),
            QueryOperation::HasAll(values)
            | QueryOperation::Includes(values)
            | QueryOperation::Excludes(values) => {
                if values.is_empty() {
                    warn!(operation = %self.kind(), "Encoding empty value set");
                }
                values.join(",")
            }
            QueryOperation::Exists(value) => value.to_string(),
        }
    }

    /// Returns the full parameter key for `field_path`.
    pub fn parameter_name(&self, field_path: &str) -> String {
        format!("{}{}", field_path, self.suffix())
    }

    /// Checks whether `first` and `second` may both constrain the same field.
    ///
    /// Only repeated `Equals` and repeated `DoesNotEqual` are recognised.
    /// Every other pairing is reported as unsupported.
    pub fn validate_combination(first: &QueryOperation, second: &QueryOperation) -> QueryResult<()> {
        match (first.kind(), second.kind()) {
            (OperationKind::Equals, OperationKind::Equals)
            | (OperationKind::DoesNotEqual, OperationKind::DoesNotEqual) => Ok(()),
            (a, b) => Err(QueryError::UnsupportedCombination {
                first: a,
                second: b,
            }),
        }
    }

    /// Checks every pair of `operations` with [`Self::validate_combination`].
    ///
    /// Stops at the first unsupported pair. Zero or one operation always passes.
    pub fn validate_combinations(operations: &[QueryOperation]) -> QueryResult<()> {
        for (i, first) in operations.iter().enumerate() {
            for second in &operations[i + 1..] {
                Self::validate_combination(first, second)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.values())
    }
}
