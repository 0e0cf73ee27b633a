//! Route resource implementation.
//!
//! Routes belong to a service and are reachable both at `routes` and under
//! `services/{service_id}/routes`. The nested collection is available on
//! [`ResourceService<Route>`] through [`list_for_service`] and
//! [`create_for_service`].
//!
//! [`list_for_service`]: ResourceService::list_for_service
//! [`create_for_service`]: ResourceService::create_for_service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::codec::{lenient_opt_vec, timestamp};
use crate::admin::{
    ListOptions, Page, Resource, ResourceError, ResourceOperation, ResourcePath, ResourceService,
};
use crate::clients::HttpMethod;
use crate::context::RequestContext;

/// Reference from a route to its service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ServiceRef {
    pub id: String,
}

/// Matching rules that send requests to a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub protocols: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub methods: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub hosts: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_vec"
    )]
    pub paths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_path: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_host: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceRef>,
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

impl Route {
    /// A draft route for `service_id` matching `paths`.
    #[must_use]
    pub fn for_service<I, S>(service_id: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: Some(paths.into_iter().map(Into::into).collect()),
            service: Some(ServiceRef {
                id: service_id.into(),
            }),
            ..Self::default()
        }
    }

    /// Id of the owning service, if set.
    #[must_use]
    pub fn service_id(&self) -> Option<&str> {
        self.service.as_ref().map(|s| s.id.as_str())
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

impl Resource for Route {
    const NAME: &'static str = "Route";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "routes/{id}"),
        ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "routes"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::List,
            &["service_id"],
            "services/{service_id}/routes",
        ),
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "routes"),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Create,
            &["service_id"],
            "services/{service_id}/routes",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["id"],
            "routes/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "routes/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl ResourceService<'_, Route> {
    /// Fetches one page of the routes attached to a service (by id or name).
    ///
    /// # Errors
    ///
    /// As [`ResourceService::list_with_parent`].
    pub async fn list_for_service(
        &self,
        ctx: &RequestContext,
        service_id_or_name: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<Route>, ResourceError> {
        self.list_with_parent(ctx, "service_id", service_id_or_name, options)
            .await
    }

    /// Creates a route under a service (by id or name).
    ///
    /// # Errors
    ///
    /// As [`ResourceService::create_with_parent`].
    pub async fn create_for_service(
        &self,
        ctx: &RequestContext,
        service_id_or_name: &str,
        draft: &Route,
    ) -> Result<Route, ResourceError> {
        self.create_with_parent(ctx, "service_id", service_id_or_name, draft)
            .await
    }
}
