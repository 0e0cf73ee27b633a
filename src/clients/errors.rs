//! HTTP-level error types.
//!
//! - [`HttpResponseError`]: a response status the resource layer could not
//!   map to a semantic error
//! - [`InvalidHttpRequestError`]: a request rejected before sending
//! - [`HttpError`]: everything that can go wrong on the wire
//!
//! # Example
//!
//! ```rust,ignore
//! use kong_admin::clients::HttpError;
//!
//! match client.request(&ctx, request).await {
//!     Ok(response) => println!("{} {}", response.code, response.body),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//!     Err(HttpError::Canceled(reason)) => println!("gave up: {reason}"),
//!     Err(e) => println!("other: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::context::CancelReason;

/// A response with a status code that has no semantic mapping.
///
/// `message` holds the gateway's `message` field when the body has one, and
/// the raw body otherwise.
///
/// # Example
///
/// ```rust
/// use kong_admin::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 500,
///     message: "An unexpected error occurred".to_string(),
///     error_reference: Some("3f1c...".to_string()),
/// };
/// assert!(error.to_string().contains("500"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error message extracted from the response body.
    pub message: String,
    /// Request ID for error reporting (from the `X-Kong-Request-Id` header).
    pub error_reference: Option<String>,
}

/// A request that fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was built with a body.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that must not carry a body.
        method: String,
    },
}

/// Unified error type for HTTP operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// A response status that has no semantic mapping.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request context was canceled or its deadline passed.
    #[error("Request {0}")]
    Canceled(CancelReason),

    /// Network, connection, or timeout error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns `true` if the transport gave up because of a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout(),
            Self::Canceled(reason) => *reason == CancelReason::DeadlineExceeded,
            _ => false,
        }
    }
}
