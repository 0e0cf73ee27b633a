//! HTTP response types.

use std::collections::HashMap;

/// A response from the Kong Admin API.
///
/// Any status code is represented; interpreting it is up to the caller.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body. Empty bodies are `{}`; bodies that are not
    /// JSON are kept as `{"raw_body": "..."}`.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of the named header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Kong-Request-Id` header value, if present.
    ///
    /// Gateways older than 3.5 do not send it; `X-Request-Id` is used as a
    /// fallback.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-kong-request-id")
            .or_else(|| self.header("x-request-id"))
    }

    /// Returns the `message` field of an error body, falling back to the raw
    /// body text.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .or_else(|| self.body.get("raw_body").and_then(serde_json::Value::as_str))
            .map_or_else(|| self.body.to_string(), ToString::to_string)
    }
}
