//! Typed resource layer for the Kong Admin API.
//!
//! - **[`Resource`] trait**: name, path templates, and id of an entity
//! - **[`ResourceService<R>`]**: create, get, update, delete, and list for any `R`
//! - **[`ListOptions`] / [`Page<T>`]**: cursor pagination with an opaque [`Offset`]
//! - **Path building**: multiple templates per operation for nested collections
//! - **[`ResourceError`]**: semantic errors mapped from status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use kong_admin::{KongClient, KongConfig, RequestContext};
//! use kong_admin::admin::{ListOptions, resources::Consumer};
//!
//! let client = KongClient::new(&KongConfig::from_env()?)?;
//! let ctx = RequestContext::background();
//!
//! let created = client.consumers().create(&ctx, &Consumer::with_username("foo")).await?;
//! let mut consumer = client.consumers().get(&ctx, "foo").await?;
//!
//! consumer.username = Some("bar".to_string());
//! let consumer = client.consumers().update(&ctx, &consumer).await?;
//!
//! let everyone = client.consumers().list_all(&ctx, Some(&ListOptions::new().with_size(100))).await?;
//!
//! client.consumers().delete(&ctx, "bar").await?;
//! ```

mod codec;
mod errors;
mod pagination;
mod path;
mod resource;
mod service;

pub mod resources;

pub use errors::ResourceError;
pub use pagination::{ListOptions, Offset, Page, TagMatch, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use resource::Resource;
pub use service::ResourceService;
