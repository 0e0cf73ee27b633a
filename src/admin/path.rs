//! Path templates for admin API resources.
//!
//! A resource declares one [`ResourcePath`] per operation and access
//! pattern. Routes, for example, are reachable both at the top level and
//! under their service:
//! - `routes` (all routes)
//! - `services/{service_id}/routes` (routes of one service)
//!
//! [`get_path`] picks the most specific template whose ids are all
//! available, and [`build_path`] interpolates percent-encoded values.
//!
//! # Example
//!
//! ```rust
//! use kong_admin::admin::{build_path, get_path, ResourceOperation, ResourcePath};
//! use kong_admin::clients::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "routes"),
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::List,
//!         &["service_id"],
//!         "services/{service_id}/routes",
//!     ),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::List, &["service_id"]).unwrap();
//! let mut ids = HashMap::new();
//! ids.insert("service_id", "billing api");
//! assert_eq!(build_path(path.template, &ids), "services/billing%20api/routes");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

use crate::clients::HttpMethod;

/// Operations that can be performed on an admin resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch one entity by id or name (GET /things/{id}).
    Get,
    /// Fetch one page of a collection (GET /things).
    List,
    /// Create an entity (POST /things).
    Create,
    /// Partially update an entity (PATCH /things/{id}).
    Update,
    /// Delete an entity (DELETE /things/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Get | Self::List => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as used in errors and logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for one resource operation.
///
/// Templates use `{id_name}` placeholders, relative to the admin root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required id parameters (e.g., `["service_id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required ids for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required ids are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for `operation` whose ids are all in
/// `available_ids`.
///
/// Returns `None` if no path matches.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Interpolates `{id_name}` placeholders with percent-encoded values.
///
/// Names and custom ids may contain characters that are not valid in a path
/// segment, so every value is encoded.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
