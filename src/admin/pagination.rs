//! Cursor pagination over admin API collections.
//!
//! Collections are listed one page at a time. Each list response carries
//! the page's entities and, unless it is the last page, an opaque
//! [`Offset`] to continue from:
//!
//! ```json
//! {
//!   "data": [{"id": "...", "username": "foo1"}],
//!   "next": "/consumers?offset=WyJmb28xIl0",
//!   "offset": "WyJmb28xIl0"
//! }
//! ```
//!
//! [`Page::into_parts`] returns the entities together with the
//! [`ListOptions`] for the next call, or `None` on the terminal page.
//!
//! # Example
//!
//! ```rust,ignore
//! use kong_admin::admin::ListOptions;
//!
//! let mut options = Some(ListOptions::new().with_size(100));
//! while let Some(current) = options {
//!     let (consumers, next) = client.consumers().list(&ctx, Some(&current)).await?.into_parts();
//!     for consumer in consumers {
//!         println!("{:?}", consumer.username);
//!     }
//!     options = next;
//! }
//! ```

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Largest page size the gateway accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size the gateway uses when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Opaque continuation token.
///
/// Only obtainable from a list response; callers cannot build one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Offset(String);

impl Offset {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a tag filter combines multiple tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagMatch {
    /// Entities carrying every tag (`tags=a,b`).
    #[default]
    All,
    /// Entities carrying at least one tag (`tags=a/b`).
    Any,
}

impl TagMatch {
    const fn separator(self) -> &'static str {
        match self {
            Self::All => ",",
            Self::Any => "/",
        }
    }
}

/// Options for one list call.
///
/// The options returned with a page keep the caller's size and tag filter.
/// Changing `size` on them applies from the next page on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Requested page size, `1..=1000`. `None` uses the gateway default,
    /// [`DEFAULT_PAGE_SIZE`].
    pub size: Option<u32>,
    /// Continuation token; `None` starts from the beginning.
    pub offset: Option<Offset>,
    /// Only list entities with these tags.
    pub tags: Vec<String>,
    /// How `tags` are combined.
    pub tag_match: TagMatch,
}

impl ListOptions {
    /// Options for the first page with the gateway's defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Filters on entities carrying all of `tags`.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.tag_match = TagMatch::All;
        self
    }

    /// Filters on entities carrying any of `tags`.
    #[must_use]
    pub fn with_any_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self.tag_match = TagMatch::Any;
        self
    }

    /// Returns `true` if these options continue a traversal.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.offset.is_some()
    }

    /// Page size the gateway will use for these options.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Checks the page size is within `1..=MAX_PAGE_SIZE`.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.size {
            Some(size) if size == 0 || size > MAX_PAGE_SIZE => Err(format!(
                "size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
            )),
            _ => Ok(()),
        }
    }

    /// Query parameters for this page.
    pub(crate) fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(size) = self.size {
            query.push(("size".to_string(), size.to_string()));
        }
        if let Some(offset) = &self.offset {
            query.push(("offset".to_string(), offset.as_str().to_string()));
        }
        if !self.tags.is_empty() {
            query.push((
                "tags".to_string(),
                self.tags.join(self.tag_match.separator()),
            ));
        }
        query
    }

    /// Options for the page after this one.
    pub(crate) fn next_page(&self, offset: Offset) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

/// One page of a collection.
///
/// Derefs to `[T]` for direct access to the entities.
#[derive(Clone, Debug)]
pub struct Page<T> {
    items: Vec<T>,
    next: Option<ListOptions>,
}

impl<T> Page<T> {
    /// Creates a page from its entities and next-page options.
    #[must_use]
    pub const fn new(items: Vec<T>, next: Option<ListOptions>) -> Self {
        Self { items, next }
    }

    /// Options for the next page, `None` on the terminal page.
    #[must_use]
    pub const fn next(&self) -> Option<&ListOptions> {
        self.next.as_ref()
    }

    /// Returns `true` unless this is the terminal page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Takes ownership of the entities, dropping the continuation.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Splits the page into its entities and the next-page options.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<ListOptions>) {
        (self.items, self.next)
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ListEnvelope<T> {
    #[serde(default, deserialize_with = "crate::admin::codec::lenient_vec")]
    data: Vec<T>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    offset: Option<String>,
}

/// Decodes a list response body into entities and the continuation token.
///
/// The token comes from `offset`, or from the `offset` query parameter of
/// `next` when the body has no `offset` field.
pub(crate) fn decode_list<T: DeserializeOwned>(
    body: serde_json::Value,
) -> Result<(Vec<T>, Option<Offset>), serde_json::Error> {
    let envelope: ListEnvelope<T> = serde_json::from_value(body)?;
    let offset = envelope
        .offset
        .filter(|o| !o.is_empty())
        .or_else(|| envelope.next.as_deref().and_then(extract_offset))
        .map(Offset::new);
    Ok((envelope.data, offset))
}

/// Extracts the `offset` parameter from a `next` path.
fn extract_offset(next: &str) -> Option<String> {
    let query_start = next.find('?')?;
    let query = &next[query_start + 1..];

    for param in query.split('&') {
        let mut parts = param.splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if key == "offset" && !value.is_empty() {
                return Some(
                    urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned()),
                );
            }
        }
    }

    None
}
