//! Service resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::codec::{lenient_opt_vec, timestamp};
use crate::admin::{Resource, ResourceOperation, ResourcePath};
use crate::clients::HttpMethod;

/// An upstream API the gateway proxies to.
///
/// Timeouts are in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<i64>,
}

impl Service {
    /// A draft service named `name` pointing at `host`.
    #[must_use]
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            host: Some(host.into()),
            ..Self::default()
        }
    }

    /// Creation time, if the gateway reported one.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        timestamp(self.created_at)
    }

    /// Last modification time, if the gateway reported one.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        timestamp(self.updated_at)
    }
}

impl Resource for Service {
    const NAME: &'static str = "Service";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "services/{id}",
        ),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "services"),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "services"),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "services/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "services/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
