//! Consumer resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::codec::{lenient_opt_vec, timestamp};
use crate::admin::{Resource, ResourceOperation, ResourcePath};
use crate::clients::HttpMethod;

/// A consumer of the services proxied by the gateway.
///
/// Either `username` or `custom_id` must be set; both are unique.
///
/// # Example
///
/// ```rust
/// use kong_admin::admin::resources::Consumer;
///
/// let draft = Consumer {
///     custom_id: Some("crm-1234".to_string()),
///     tags: Some(vec!["billing".to_string()]),
///     ..Consumer::with_username("alice")
/// };
/// assert!(draft.id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Consumer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
}

impl Consumer {
    /// A draft consumer with only a username.
    #[must_use]
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Creation time, if the gateway reported one.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created_at)
    }
}

impl Resource for Consumer {
    const NAME: &'static str = "Consumer";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "consumers/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "consumers"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &[],
            "consumers",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "consumers/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "consumers/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
