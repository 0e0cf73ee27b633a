//! The [`Resource`] trait implemented by every admin entity.
//!
//! A resource declares its display name, its path templates, and which of
//! its fields the gateway owns. [`ResourceService`](crate::admin::ResourceService)
//! provides the CRUD and list operations on top of it.
//!
//! # Implementing a Resource
//!
//! ```rust
//! use kong_admin::admin::{Resource, ResourceOperation, ResourcePath};
//! use kong_admin::clients::HttpMethod;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! pub struct Upstream {
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     pub id: Option<String>,
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     pub name: Option<String>,
//! }
//!
//! impl Resource for Upstream {
//!     const NAME: &'static str = "Upstream";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "upstreams/{id}"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "upstreams"),
//!         ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "upstreams"),
//!         ResourcePath::new(HttpMethod::Patch, ResourceOperation::Update, &["id"], "upstreams/{id}"),
//!         ResourcePath::new(HttpMethod::Delete, ResourceOperation::Delete, &["id"], "upstreams/{id}"),
//!     ];
//!
//!     fn id(&self) -> Option<&str> {
//!         self.id.as_deref()
//!     }
//! }
//! ```

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::admin::codec::encode_body;
use crate::admin::ResourcePath;

/// An entity managed through the admin API.
///
/// Attributes are `Option<T>`: `None` is absent and never sent, `Some` is
/// sent as-is, including zero values. Fields the gateway owns (timestamps)
/// are marked `#[serde(skip_serializing)]`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The singular name used in errors and logs (e.g., "Consumer").
    const NAME: &'static str;

    /// Path templates for each supported operation.
    const PATHS: &'static [ResourcePath];

    /// Returns the entity's id, `None` for drafts without one.
    fn id(&self) -> Option<&str>;

    /// Body for a create request: present fields, including a
    /// caller-supplied id.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the entity does not encode as a
    /// JSON object.
    fn create_body(&self) -> Result<Value, serde_json::Error> {
        encode_body(self, &[]).map(Value::Object)
    }

    /// Body for a partial update: present fields without the id.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the entity does not encode as a
    /// JSON object.
    fn update_body(&self) -> Result<Value, serde_json::Error> {
        encode_body(self, &["id"]).map(Value::Object)
    }
}
