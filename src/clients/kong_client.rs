//! Entry point for the Kong Admin API.
//!
//! [`KongClient`] owns the transport and hands out typed
//! [`ResourceService`] views, one per resource type.

use crate::admin::resources::{Consumer, Route, Service};
use crate::admin::{Resource, ResourceService};
use crate::clients::{HttpClient, HttpError};
use crate::config::KongConfig;

/// Client for the Kong Admin API.
///
/// Stateless apart from its connection pool: cloning is cheap and clones
/// share connections.
///
/// # Thread Safety
///
/// `KongClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use kong_admin::{KongClient, KongConfig, RequestContext};
/// use kong_admin::admin::resources::Consumer;
///
/// let client = KongClient::new(&KongConfig::from_env()?)?;
/// let ctx = RequestContext::background();
///
/// let consumer = client.consumers().create(&ctx, &Consumer::with_username("foo")).await?;
/// let page = client.consumers().list(&ctx, None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct KongClient {
    http_client: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KongClient>();
};

impl KongClient {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &KongConfig) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(base_url = http_client.base_url(), "created admin client");
        Ok(Self { http_client })
    }

    /// Returns the underlying HTTP client for raw requests.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Operations on any resource type.
    #[must_use]
    pub const fn resource<R: Resource>(&self) -> ResourceService<'_, R> {
        ResourceService::new(&self.http_client)
    }

    /// Operations on consumers.
    #[must_use]
    pub const fn consumers(&self) -> ResourceService<'_, Consumer> {
        self.resource()
    }

    /// Operations on services.
    #[must_use]
    pub const fn services(&self) -> ResourceService<'_, Service> {
        self.resource()
    }

    /// Operations on routes.
    #[must_use]
    pub const fn routes(&self) -> ResourceService<'_, Route> {
        self.resource()
    }
}
