//! # Kong Admin API Rust Client
//!
//! A typed Rust client for the Kong gateway's Admin API: create, read,
//! update, delete, and paginated listing over consumers, services, routes,
//! and any other entity implementing [`admin::Resource`].
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`KongConfig`] and [`KongConfigBuilder`]
//! - Validated newtypes for the admin URL, token, and workspace
//! - A generic [`admin::ResourceService`] with CRUD and cursor pagination
//! - Semantic errors ([`admin::ResourceError`]) mapped from status codes
//! - Cancellation and deadlines through [`RequestContext`]
//!
//! ## Quick Start
//!
//! ```rust
//! use kong_admin::{AdminToken, AdminUrl, KongConfig};
//! use std::time::Duration;
//!
//! let config = KongConfig::builder()
//!     .admin_url(AdminUrl::new("https://kong-admin.internal:8444").unwrap())
//!     .admin_token(AdminToken::new("s3cret").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Managing Consumers
//!
//! ```rust,ignore
//! use kong_admin::{KongClient, KongConfig, RequestContext};
//! use kong_admin::admin::resources::Consumer;
//!
//! let client = KongClient::new(&KongConfig::from_env()?)?;
//! let ctx = RequestContext::background();
//!
//! let created = client.consumers().create(&ctx, &Consumer::with_username("foo")).await?;
//! let id = created.id.clone().unwrap_or_default();
//!
//! let mut consumer = client.consumers().get(&ctx, &id).await?;
//! consumer.username = Some("bar".to_string());
//! client.consumers().update(&ctx, &consumer).await?;
//!
//! client.consumers().delete(&ctx, &id).await?;
//! ```
//!
//! ## Pagination
//!
//! ```rust,ignore
//! use kong_admin::admin::ListOptions;
//!
//! let (first, next) = client
//!     .consumers()
//!     .list(&ctx, Some(&ListOptions::new().with_size(1)))
//!     .await?
//!     .into_parts();
//!
//! if let Some(mut next) = next {
//!     next.size = Some(2);
//!     let rest = client.consumers().list(&ctx, Some(&next)).await?;
//!     assert!(!rest.has_next());
//! }
//! ```
//!
//! ## Cancellation
//!
//! ```rust,ignore
//! use kong_admin::RequestContext;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let ctx = RequestContext::with_cancellation(token.clone())
//!     .with_timeout(Duration::from_secs(2));
//!
//! // token.cancel() from another task aborts the in-flight request
//! let page = client.services().list(&ctx, None).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and identifiers are checked before sending
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No hidden retries**: Every call is exactly one round trip

pub mod admin;
pub mod clients;
pub mod config;
pub mod context;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{AdminToken, AdminUrl, KongConfig, KongConfigBuilder, Workspace};
pub use context::{CancelReason, RequestContext};
pub use error::ConfigError;

pub use admin::{ListOptions, Page, ResourceError};
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, KongClient,
};
