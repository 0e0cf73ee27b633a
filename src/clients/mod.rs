//! HTTP transport for Kong Admin API communication.
//!
//! This module is the wire layer underneath the typed resource services in
//! [`crate::admin`]. It builds URLs against the configured admin root,
//! injects the default headers, and returns every response regardless of
//! status so the resource layer can interpret it.
//!
//! # Overview
//!
//! - [`KongClient`]: Entry point handing out typed resource services
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent to the admin API
//! - [`HttpResponse`]: A parsed response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: Transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use kong_admin::{KongConfig, RequestContext};
//! use kong_admin::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(&KongConfig::from_env()?)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "consumers")
//!     .query_param("size", "10")
//!     .build()?;
//!
//! let response = client.request(&RequestContext::background(), request).await?;
//! println!("{}", response.body);
//! ```
//!
//! # Retries
//!
//! Requests are sent exactly once. Cancellation and deadlines come from the
//! [`RequestContext`](crate::RequestContext) passed to each call.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod kong_client;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, ADMIN_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use kong_client::KongClient;
