//! Error types for Enlazar operations.
//!
//! The engine is deliberately hard to break at runtime: unknown ids and
//! malformed catalog data degrade to empty results (a broken link on a page
//! must never take the page down). The only fail-fast surface is
//! construction-time configuration validation.

use std::fmt;

/// Main error type for Enlazar operations.
///
/// # Examples
///
/// ```
/// use enlazar::error::EnlazarError;
///
/// let err = EnlazarError::InvalidConfig {
///     param: "min_relevance_score".to_string(),
///     value: "1.5".to_string(),
///     constraint: "must be within [0, 1]".to_string(),
/// };
/// assert!(err.to_string().contains("min_relevance_score"));
/// ```
#[derive(Debug)]
pub enum EnlazarError {
    /// Invalid configuration value provided at construction.
    InvalidConfig {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for EnlazarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnlazarError::InvalidConfig {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid configuration: {param} = {value}, expected {constraint}"
                )
            }
            EnlazarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for EnlazarError {}

impl From<&str> for EnlazarError {
    fn from(msg: &str) -> Self {
        EnlazarError::Other(msg.to_string())
    }
}

/// Convenience result type for Enlazar operations.
pub type Result<T> = std::result::Result<T, EnlazarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = EnlazarError::InvalidConfig {
            param: "cache_capacity".to_string(),
            value: "0".to_string(),
            constraint: "must be at least 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache_capacity"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_from_str() {
        let err: EnlazarError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
