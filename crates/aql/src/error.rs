//! Error types for aql

use thiserror::Error;

/// Result type alias for aql operations
pub type AqlResult<T> = Result<T, AqlError>;

/// Errors raised while compiling a statement spec.
///
/// Every variant aborts the current compilation; no partial SQL is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AqlError {
    /// A value that must be bound is not one of null, bool, int or string.
    #[error(
        "Unsupported bind type '{kind}'. Supported bind types: null, bool, int, string"
    )]
    UnsupportedBindKind { kind: &'static str },

    /// A condition entry has a shape that does not fit its comparison.
    #[error("Malformed condition: {0}")]
    MalformedCondition(String),

    /// A top-level clause has a shape the compiler cannot render.
    #[error("Malformed '{clause}' clause: {message}")]
    MalformedClause {
        clause: &'static str,
        message: String,
    },

    /// The compiler was configured without an identifier platform.
    #[error("No identifier platform configured")]
    MissingPlatform,

    /// A dialect name could not be resolved to a built-in platform.
    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),
}

impl AqlError {
    /// Create an unsupported bind kind error
    pub fn unsupported_bind_kind(kind: &'static str) -> Self {
        Self::UnsupportedBindKind { kind }
    }

    /// Create a malformed condition error
    pub fn malformed_condition(message: impl Into<String>) -> Self {
        Self::MalformedCondition(message.into())
    }

    /// Create a malformed clause error for a specific clause
    pub fn malformed_clause(clause: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedClause {
            clause,
            message: message.into(),
        }
    }

    /// Check if this is an unsupported bind kind error
    pub fn is_unsupported_bind_kind(&self) -> bool {
        matches!(self, Self::UnsupportedBindKind { .. })
    }

    /// Check if this is a malformed condition error
    pub fn is_malformed_condition(&self) -> bool {
        matches!(self, Self::MalformedCondition(_))
    }

    /// Check if this is a malformed clause error
    pub fn is_malformed_clause(&self) -> bool {
        matches!(self, Self::MalformedClause { .. })
    }
}
