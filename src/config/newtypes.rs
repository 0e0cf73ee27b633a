//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction, so a
//! [`KongConfig`](crate::KongConfig) can only ever hold usable values.

use crate::error::ConfigError;
use std::fmt;

/// A validated base URL for the Kong Admin API.
///
/// Only `http` and `https` schemes are accepted. Trailing slashes are
/// stripped so paths can be joined with a single `/`. A path prefix is kept,
/// which supports admin APIs mounted behind a reverse proxy.
///
/// # Example
///
/// ```rust
/// use kong_admin::AdminUrl;
///
/// let url = AdminUrl::new("http://localhost:8001/").unwrap();
/// assert_eq!(url.as_ref(), "http://localhost:8001");
/// assert_eq!(url.scheme(), "http");
/// assert_eq!(url.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl AdminUrl {
    /// The admin address a stock Kong node listens on.
    pub const DEFAULT: &'static str = "http://localhost:8001";

    /// Creates a new validated admin URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAdminUrl`] if the URL has no scheme, a
    /// scheme other than `http`/`https`, an empty host, or a query/fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidAdminUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = url[..scheme_end].to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(invalid());
        }

        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        // IPv6 literals carry colons inside brackets
        let remainder = &url[host_start..];
        let host_end = if remainder.starts_with('[') {
            remainder
                .find(']')
                .map(|i| host_start + i + 1)
                .ok_or_else(invalid)?
        } else {
            remainder
                .find([':', '/'])
                .map_or(url.len(), |i| host_start + i)
        };

        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Returns `true` if the host is a loopback name or address.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        matches!(
            self.host_name(),
            "localhost" | "127.0.0.1" | "[::1]" | "0.0.0.0"
        )
    }
}

impl Default for AdminUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 4,
            host_start: 7,
            host_end: 16,
        }
    }
}

impl AsRef<str> for AdminUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for AdminUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A validated admin API token, sent as the `Kong-Admin-Token` header.
///
/// The `Debug` implementation masks the value so tokens never end up in logs.
///
/// # Example
///
/// ```rust
/// use kong_admin::AdminToken;
///
/// let token = AdminToken::new("s3cr3t").unwrap();
/// assert_eq!(format!("{:?}", token), "AdminToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AdminToken(String);

impl AdminToken {
    /// Creates a new admin token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAdminToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyAdminToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AdminToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminToken(*****)")
    }
}

/// A Kong Enterprise workspace name.
///
/// When configured, the workspace is inserted as the first path segment of
/// every admin request (`/{workspace}/consumers`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace(String);

impl Workspace {
    /// Creates a new validated workspace name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidWorkspace`] if the name is empty or
    /// contains characters outside the unreserved URL set.
    pub fn new(workspace: impl Into<String>) -> Result<Self, ConfigError> {
        let workspace = workspace.into();
        let valid = !workspace.is_empty()
            && workspace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~'));
        if !valid {
            return Err(ConfigError::InvalidWorkspace { workspace });
        }
        Ok(Self(workspace))
    }
}

impl AsRef<str> for Workspace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
