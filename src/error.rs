//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! values are rejected before a client is ever built.
//!
//! # Example
//!
//! ```rust
//! use kong_admin::{AdminToken, ConfigError};
//!
//! let result = AdminToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAdminToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`KongConfig`](crate::KongConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The admin URL is malformed.
    #[error("Invalid admin URL '{url}'. Expected an http or https URL (e.g., 'http://localhost:8001').")]
    InvalidAdminUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The admin token cannot be empty.
    #[error("Admin token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAdminToken,

    /// The workspace name is invalid.
    #[error("Invalid workspace '{workspace}'. Workspace names may only contain letters, digits, '-', '_', '.' and '~'.")]
    InvalidWorkspace {
        /// The invalid workspace that was provided.
        workspace: String,
    },

    /// A request timeout of zero was configured.
    #[error("Request timeout must be greater than zero.")]
    ZeroTimeout,

    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value '{value}' for environment variable {var}.")]
    InvalidEnvValue {
        /// The variable name.
        var: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_admin_url_error_message() {
        let error = ConfigError::InvalidAdminUrl {
            url: "localhost:8001".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("localhost:8001"));
        assert!(message.contains("http or https"));
    }

    #[test]
    fn test_invalid_env_value_names_variable() {
        let error = ConfigError::InvalidEnvValue {
            var: "KONG_ADMIN_TIMEOUT_SECS",
            value: "soon".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("KONG_ADMIN_TIMEOUT_SECS"));
        assert!(message.contains("soon"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAdminToken;
        let _: &dyn std::error::Error = &error;
    }
}
