//! Configuration types for the Kong Admin API client.
//!
//! # Overview
//!
//! - [`KongConfig`]: immutable settings shared by every request
//! - [`KongConfigBuilder`]: builder for [`KongConfig`]
//! - [`AdminUrl`]: validated admin API base URL
//! - [`AdminToken`]: admin token with masked debug output
//! - [`Workspace`]: Kong Enterprise workspace name
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use kong_admin::{AdminToken, AdminUrl, KongConfig};
//!
//! let config = KongConfig::builder()
//!     .admin_url(AdminUrl::new("http://kong-admin:8001").unwrap())
//!     .admin_token(AdminToken::new("secret").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.admin_url().as_ref(), "http://kong-admin:8001");
//! ```

mod newtypes;

pub use newtypes::{AdminToken, AdminUrl, Workspace};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the admin API base URL.
pub const ENV_ADMIN_URL: &str = "KONG_ADMIN_URL";
/// Environment variable holding the admin token.
pub const ENV_ADMIN_TOKEN: &str = "KONG_ADMIN_TOKEN";
/// Environment variable holding the workspace name.
pub const ENV_WORKSPACE: &str = "KONG_WORKSPACE";
/// Environment variable holding the request timeout in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "KONG_ADMIN_TIMEOUT_SECS";

/// Configuration for a [`KongClient`](crate::KongClient).
///
/// `KongConfig` is `Clone + Send + Sync` and never changes after
/// construction.
#[derive(Clone, Debug, Default)]
pub struct KongConfig {
    admin_url: AdminUrl,
    admin_token: Option<AdminToken>,
    workspace: Option<Workspace>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl KongConfig {
    /// Creates a new builder for constructing a `KongConfig`.
    #[must_use]
    pub fn builder() -> KongConfigBuilder {
        KongConfigBuilder::new()
    }

    /// Builds a configuration from `KONG_ADMIN_URL`, `KONG_ADMIN_TOKEN`,
    /// `KONG_WORKSPACE` and `KONG_ADMIN_TIMEOUT_SECS`.
    ///
    /// Unset or empty variables fall back to the builder defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(url) = get(ENV_ADMIN_URL) {
            builder = builder.admin_url(AdminUrl::new(url)?);
        }
        if let Some(token) = get(ENV_ADMIN_TOKEN) {
            builder = builder.admin_token(AdminToken::new(token)?);
        }
        if let Some(workspace) = get(ENV_WORKSPACE) {
            builder = builder.workspace(Workspace::new(workspace)?);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnvValue {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Returns the admin API base URL.
    #[must_use]
    pub const fn admin_url(&self) -> &AdminUrl {
        &self.admin_url
    }

    /// Returns the admin token, if configured.
    #[must_use]
    pub const fn admin_token(&self) -> Option<&AdminToken> {
        self.admin_token.as_ref()
    }

    /// Returns the workspace, if configured.
    #[must_use]
    pub const fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KongConfig>();
};

/// Builder for [`KongConfig`].
///
/// # Defaults
///
/// - `admin_url`: `http://localhost:8001`
/// - `admin_token`: `None`
/// - `workspace`: `None` (default workspace)
/// - `timeout`: `None` (no client-side timeout)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct KongConfigBuilder {
    admin_url: Option<AdminUrl>,
    admin_token: Option<AdminToken>,
    workspace: Option<Workspace>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl KongConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the admin API base URL.
    #[must_use]
    pub fn admin_url(mut self, url: AdminUrl) -> Self {
        self.admin_url = Some(url);
        self
    }

    /// Sets the admin token.
    #[must_use]
    pub fn admin_token(mut self, token: AdminToken) -> Self {
        self.admin_token = Some(token);
        self
    }

    /// Sets the workspace every request is scoped to.
    #[must_use]
    pub fn workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = Some(workspace);
        self
    }

    /// Sets the transport-level timeout applied to each request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`KongConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] if a zero timeout was set.
    pub fn build(self) -> Result<KongConfig, ConfigError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(KongConfig {
            admin_url: self.admin_url.unwrap_or_default(),
            admin_token: self.admin_token,
            workspace: self.workspace,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
