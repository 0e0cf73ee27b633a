//! Resource-level error types for admin API operations.
//!
//! The resource layer maps HTTP status codes to semantic variants:
//!
//! - **400**: [`ResourceError::Validation`] - schema violation reported by the gateway
//! - **404**: [`ResourceError::NotFound`] - no entity with that id or name
//! - **409**: [`ResourceError::Conflict`] - unique constraint violation
//! - **Other non-2xx**: [`ResourceError::Transport`] wrapping [`HttpResponseError`]
//!
//! Client-side checks (empty identifiers, malformed ids, out of range page
//! sizes) are reported as [`ResourceError::Validation`] before any request
//! is sent.
//!
//! # Example
//!
//! ```rust,ignore
//! use kong_admin::admin::ResourceError;
//!
//! match client.consumers().get(&ctx, "alice").await {
//!     Ok(consumer) => println!("Found: {:?}", consumer.username),
//!     Err(ResourceError::NotFound { resource, id, .. }) => {
//!         println!("{resource} {id} does not exist");
//!     }
//!     Err(ResourceError::Validation { fields, .. }) => {
//!         for (field, messages) in fields {
//!             println!("{field}: {messages:?}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, HttpResponseError};
use crate::context::CancelReason;

/// Error type for admin resource operations.
///
/// # Example
///
/// ```rust
/// use kong_admin::admin::ResourceError;
///
/// let error = ResourceError::NotFound {
///     resource: "Consumer",
///     operation: "get",
///     id: "alice".to_string(),
///     parent: None,
/// };
/// assert!(error.is_not_found());
/// assert_eq!(error.to_string(), "Consumer::get: id alice not found");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request was rejected as invalid, by the gateway (HTTP 400) or by
    /// a check made before sending.
    #[error("{resource}::{operation} rejected: {message}")]
    Validation {
        /// The type name of the resource (e.g., "Consumer").
        resource: &'static str,
        /// The operation being attempted (e.g., "create").
        operation: &'static str,
        /// Human-readable summary.
        message: String,
        /// Per-field messages. Nested gateway fields use dotted keys.
        fields: HashMap<String, Vec<String>>,
        /// Request ID from the `X-Kong-Request-Id` header.
        request_id: Option<String>,
    },

    /// A unique constraint was violated (HTTP 409).
    #[error("{resource}::{operation} conflict: {message}")]
    Conflict {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// The id involved, if known (a caller-supplied id on create).
        id: Option<String>,
        /// The gateway's message, naming the conflicting field.
        message: String,
        /// Request ID from the `X-Kong-Request-Id` header.
        request_id: Option<String>,
    },

    /// No entity matched the identifier (HTTP 404).
    ///
    /// On nested collections the missing entity is the parent: `parent`
    /// names its id field (e.g. `service_id`) and `id` holds its value.
    #[error("{resource}::{operation}: {} {id} not found", .parent.as_deref().unwrap_or("id"))]
    NotFound {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// The id or name that was requested.
        id: String,
        /// The parent id field, when the parent of a nested collection is missing.
        parent: Option<String>,
    },

    /// The request did not complete: network failure, timeout, or a status
    /// code with no semantic mapping.
    #[error("{resource}::{operation} failed: {source}")]
    Transport {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// The id involved, if any.
        id: Option<String>,
        /// The underlying transport error.
        source: HttpError,
    },

    /// The request context was canceled or its deadline passed.
    #[error("{resource}::{operation} {reason}")]
    Canceled {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// Whether the caller canceled or the deadline passed.
        reason: CancelReason,
    },

    /// A successful response could not be decoded, or a request body could
    /// not be encoded.
    #[error("{resource}::{operation} invalid payload: {message}")]
    InvalidResponse {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
        /// The id involved, if any.
        id: Option<String>,
        /// Codec error description.
        message: String,
    },

    /// No path template matches the operation and the ids provided.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },
}

impl ResourceError {
    /// Maps a non-2xx response to a semantic error.
    ///
    /// - 400 -> `Validation` (fields flattened from the body's `fields`)
    /// - 404 -> `NotFound`
    /// - 409 -> `Conflict`
    /// - Other -> `Transport`
    ///
    /// # Example
    ///
    /// ```rust
    /// use kong_admin::admin::ResourceError;
    /// use kong_admin::clients::HttpResponse;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse::new(404, HashMap::new(), json!({"message": "Not found"}));
    /// let error = ResourceError::from_http_response(&response, "Consumer", "get", Some("bob"));
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        response: &HttpResponse,
        resource: &'static str,
        operation: &'static str,
        id: Option<&str>,
    ) -> Self {
        let request_id = response.request_id().map(ToString::to_string);
        match response.code {
            400 => Self::Validation {
                resource,
                operation,
                message: response.error_message(),
                fields: parse_validation_fields(&response.body),
                request_id,
            },
            404 => Self::NotFound {
                resource,
                operation,
                id: id.unwrap_or("unknown").to_string(),
                parent: None,
            },
            409 => Self::Conflict {
                resource,
                operation,
                id: id.map(ToString::to_string),
                message: response.error_message(),
                request_id,
            },
            code => Self::Transport {
                resource,
                operation,
                id: id.map(ToString::to_string),
                source: HttpError::Response(HttpResponseError {
                    code,
                    message: response.error_message(),
                    error_reference: request_id,
                }),
            },
        }
    }

    /// Wraps a transport failure, separating cancellation from the rest.
    #[must_use]
    pub fn from_http_error(
        error: HttpError,
        resource: &'static str,
        operation: &'static str,
        id: Option<&str>,
    ) -> Self {
        match error {
            HttpError::Canceled(reason) => Self::Canceled {
                resource,
                operation,
                reason,
            },
            source => Self::Transport {
                resource,
                operation,
                id: id.map(ToString::to_string),
                source,
            },
        }
    }

    /// Attributes a 404 on a nested collection to the missing parent.
    ///
    /// Other errors are returned unchanged.
    pub(crate) fn with_parent(self, parent_id_name: &str, parent_id: &str) -> Self {
        match self {
            Self::NotFound {
                resource,
                operation,
                ..
            } => Self::NotFound {
                resource,
                operation,
                id: parent_id.to_string(),
                parent: Some(parent_id_name.to_string()),
            },
            other => other,
        }
    }

    /// A validation error raised before sending, tied to a single field.
    pub(crate) fn invalid_field(
        resource: &'static str,
        operation: &'static str,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let mut fields = HashMap::new();
        fields.insert(field.to_string(), vec![message.clone()]);
        Self::Validation {
            resource,
            operation,
            message,
            fields,
            request_id: None,
        }
    }

    /// Returns `true` for [`ResourceError::NotFound`].
    ///
    /// Lets callers treat a repeated delete as "already gone".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`ResourceError::Conflict`].
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` for [`ResourceError::Validation`].
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` for [`ResourceError::Canceled`].
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Validation { request_id, .. } | Self::Conflict { request_id, .. } => {
                request_id.as_deref()
            }
            Self::Transport {
                source: HttpError::Response(e),
                ..
            } => e.error_reference.as_deref(),
            _ => None,
        }
    }
}

/// Flattens the gateway's `fields` object into `field -> messages`.
///
/// Schema violations look like:
/// ```json
/// {
///   "code": 2,
///   "name": "schema violation",
///   "message": "schema violation (port: value should be between 0 and 65535)",
///   "fields": {
///     "port": "value should be between 0 and 65535",
///     "@entity": ["at least one of these fields must be non-empty: 'custom_id', 'username'"],
///     "config": { "minute": "expected a number" }
///   }
/// }
/// ```
///
/// Nested objects produce dotted keys (`config.minute`).
fn parse_validation_fields(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();
    if let Some(fields) = body.get("fields") {
        collect_fields(fields, None, &mut result);
    }
    result
}

fn collect_fields(
    value: &serde_json::Value,
    prefix: Option<&str>,
    out: &mut HashMap<String, Vec<String>>,
) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                let name = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
                collect_fields(nested, Some(&name), out);
            }
        }
        serde_json::Value::Array(items) => {
            let key = prefix.unwrap_or("@entity").to_string();
            for (index, item) in items.iter().enumerate() {
                match item {
                    serde_json::Value::String(s) => {
                        out.entry(key.clone()).or_default().push(s.clone());
                    }
                    serde_json::Value::Null => {}
                    nested => collect_fields(nested, Some(&format!("{key}[{index}]")), out),
                }
            }
        }
        serde_json::Value::String(s) => {
            let key = prefix.unwrap_or("@entity").to_string();
            out.entry(key).or_default().push(s.clone());
        }
        serde_json::Value::Null => {}
        other => {
            let key = prefix.unwrap_or("@entity").to_string();
            out.entry(key).or_default().push(other.to_string());
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
