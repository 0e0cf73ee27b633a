//! HTTP transport for the Kong Admin API.
//!
//! [`HttpClient`] owns a `reqwest::Client`, the admin base URL, and the
//! default headers. It sends one request per call and never retries.

use std::collections::HashMap;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::KongConfig;
use crate::context::RequestContext;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the admin token.
pub const ADMIN_TOKEN_HEADER: &str = "Kong-Admin-Token";

/// HTTP client for the Kong Admin API.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`; the inner `reqwest::Client` pools
/// connections and is shared by every request.
///
/// # Example
///
/// ```rust,ignore
/// use kong_admin::{KongConfig, RequestContext};
/// use kong_admin::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&KongConfig::default())?;
/// let request = HttpRequest::builder(HttpMethod::Get, "consumers").build()?;
/// let response = client.request(&RequestContext::background(), request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Admin URL plus workspace segment, without a trailing slash.
    base_url: String,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS backend initialization failure).
    pub fn new(config: &KongConfig) -> Result<Self, HttpError> {
        let base_url = config.workspace().map_or_else(
            || config.admin_url().to_string(),
            |ws| format!("{}/{}", config.admin_url(), ws.as_ref()),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}kong-admin-rust v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if let Some(token) = config.admin_token() {
            default_headers.insert(ADMIN_TOKEN_HEADER.to_string(), token.as_ref().to_string());
        } else if !config.admin_url().is_loopback() {
            tracing::warn!(
                "No admin token configured for non-local admin API at {}",
                config.admin_url()
            );
        }

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            default_headers,
        })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL for a path relative to the admin root.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - request validation fails (`InvalidRequest`)
    /// - the context is canceled or its deadline passes (`Canceled`)
    /// - a network or timeout error occurs (`Network`)
    pub async fn request(
        &self,
        ctx: &RequestContext,
        request: HttpRequest,
    ) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request.path);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in &request.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, path = %request.path, "sending admin request");

        let exchange = async {
            let res = req_builder.send().await?;
            let code = res.status().as_u16();
            let headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await?;
            Ok::<_, reqwest::Error>((code, headers, body_text))
        };

        let (code, headers, body_text) = ctx
            .run(exchange)
            .await
            .map_err(HttpError::Canceled)??;

        let body = Self::parse_body(&body_text);
        let response = HttpResponse::new(code, headers, body);

        if code >= 500 {
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                request_id = response.request_id().unwrap_or("-"),
                "admin API server error"
            );
        } else {
            tracing::debug!(
                method = %request.http_method,
                path = %request.path,
                status = code,
                "admin request completed"
            );
        }

        Ok(response)
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn parse_body(body_text: &str) -> serde_json::Value {
        if body_text.trim().is_empty() {
            return serde_json::json!({});
        }
        serde_json::from_str(body_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
    }
}
