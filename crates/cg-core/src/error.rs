//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so a configuration or table problem surfaces with
//! the same message wherever it is raised.

use thiserror::Error;

/// The base error type for `cg-core` and every crate built on it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A simulation config field is negative, fractional, or out of range.
    #[error("configuration error: `{field}` {reason}")]
    Configuration {
        field:  &'static str,
        reason: String,
    },

    /// A transition table is empty, has a negative weight, or does not sum
    /// to one.
    #[error("invalid transition table: {0}")]
    InvalidTable(String),
}

impl CoreError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Configuration { field, reason: reason.into() }
    }
}

/// Shorthand result type for `cg-core`.
pub type CoreResult<T> = Result<T, CoreError>;
