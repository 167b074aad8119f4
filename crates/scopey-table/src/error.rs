//! Error types for the symbol table.

use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Main error type for table operations.
///
/// Every variant is recoverable: the table stays usable after reporting
/// one, so a front end can emit a diagnostic and keep compiling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An empty string was passed as an identifier
    #[error("empty identifier")]
    EmptyIdentifier,

    /// The identifier is already declared in the current scope
    #[error("'{name}' already declared in this scope (line {line})")]
    Redeclared {
        /// The identifier that was redeclared
        name: String,
        /// Line of the earlier declaration
        line: u32,
    },

    /// A scope exit with no matching scope entry
    #[error("unmatched scope exit")]
    UnbalancedScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(TableError::EmptyIdentifier.to_string(), "empty identifier");
        assert_eq!(
            TableError::Redeclared {
                name: "x".to_string(),
                line: 4,
            }
            .to_string(),
            "'x' already declared in this scope (line 4)"
        );
        assert_eq!(
            TableError::UnbalancedScope.to_string(),
            "unmatched scope exit"
        );
    }
}
