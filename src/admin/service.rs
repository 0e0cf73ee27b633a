//! Generic CRUD and list operations over one resource type.
//!
//! [`ResourceService`] is a thin, stateless view over the shared
//! [`HttpClient`]. Each call is one round trip; status codes are mapped to
//! [`ResourceError`] variants and nothing is retried.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde_json::Value;

use crate::admin::pagination::decode_list;
use crate::admin::{
    build_path, get_path, ListOptions, Page, Resource, ResourceError, ResourceOperation,
};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::context::RequestContext;

/// Typed operations for resource `R`.
///
/// Obtained from [`KongClient`](crate::KongClient):
///
/// ```rust,ignore
/// let consumers = client.consumers();
/// let created = consumers.create(&ctx, &Consumer::with_username("alice")).await?;
/// let fetched = consumers.get(&ctx, "alice").await?;
/// consumers.delete(&ctx, created.id.as_deref().unwrap_or_default()).await?;
/// ```
#[derive(Debug)]
pub struct ResourceService<'c, R> {
    client: &'c HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceService<'_, R> {}

impl<'c, R: Resource> ResourceService<'c, R> {
    /// Creates a service over `client`.
    #[must_use]
    pub const fn new(client: &'c HttpClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Creates an entity from `draft`.
    ///
    /// A caller-supplied id must be a UUID and is kept by the gateway;
    /// otherwise the gateway assigns one.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] for a malformed id or a 400 response
    /// - [`ResourceError::Conflict`] when the id or a unique field is taken
    /// - [`ResourceError::Transport`] / [`ResourceError::Canceled`]
    pub async fn create(&self, ctx: &RequestContext, draft: &R) -> Result<R, ResourceError> {
        self.create_in(ctx, None, draft).await
    }

    /// Creates an entity inside a parent collection, e.g. a route under
    /// `services/{service_id}/routes`.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), plus [`ResourceError::NotFound`] naming
    /// the parent when it does not exist, and
    /// [`ResourceError::PathResolutionFailed`] if `R` has no nested path for
    /// `parent_id_name`.
    pub async fn create_with_parent(
        &self,
        ctx: &RequestContext,
        parent_id_name: &str,
        parent_id: &str,
        draft: &R,
    ) -> Result<R, ResourceError> {
        Self::require_identifier(ResourceOperation::Create, parent_id_name, parent_id)?;
        self.create_in(ctx, Some((parent_id_name, parent_id)), draft)
            .await
    }

    async fn create_in(
        &self,
        ctx: &RequestContext,
        parent: Option<(&str, &str)>,
        draft: &R,
    ) -> Result<R, ResourceError> {
        let operation = ResourceOperation::Create;
        let id = draft.id();
        if let Some(id) = id {
            if uuid::Uuid::parse_str(id).is_err() {
                return Err(ResourceError::invalid_field(
                    R::NAME,
                    operation.as_str(),
                    "id",
                    format!("'{id}' is not a valid UUID"),
                ));
            }
        }

        let path = Self::resolve(operation, &Self::parent_ids(parent))?;
        let body = draft
            .create_body()
            .map_err(|e| Self::codec_error(operation, id, &e))?;
        let request = HttpRequest::builder(operation.default_http_method(), path)
            .body(body)
            .build()
            .map_err(|e| ResourceError::from_http_error(e.into(), R::NAME, operation.as_str(), id))?;

        let response = self
            .send(ctx, operation, id, request)
            .await
            .map_err(|e| Self::attribute_to_parent(e, parent))?;
        Self::decode_entity(operation, id, response.body)
    }

    /// Fetches an entity by id or unique name (e.g., a consumer's username).
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] for an empty identifier
    /// - [`ResourceError::NotFound`] if nothing matches
    /// - [`ResourceError::Transport`] / [`ResourceError::Canceled`]
    pub async fn get(&self, ctx: &RequestContext, id_or_name: &str) -> Result<R, ResourceError> {
        let operation = ResourceOperation::Get;
        Self::require_identifier(operation, "id", id_or_name)?;

        let response = self.fetch(ctx, operation, id_or_name).await?;
        Self::decode_entity(operation, Some(id_or_name), response.body)
    }

    /// Partially updates `resource`, sending only its present fields.
    ///
    /// The id selects the entity and is never part of the body.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] if `resource` has no id, or on a 400
    /// - [`ResourceError::NotFound`] if the entity no longer exists
    /// - [`ResourceError::Conflict`] when a unique field is taken
    /// - [`ResourceError::Transport`] / [`ResourceError::Canceled`]
    pub async fn update(&self, ctx: &RequestContext, resource: &R) -> Result<R, ResourceError> {
        let operation = ResourceOperation::Update;
        let id = resource.id().unwrap_or_default();
        Self::require_identifier(operation, "id", id)?;

        let path = Self::resolve(operation, &Self::entity_ids(id))?;
        let body = resource
            .update_body()
            .map_err(|e| Self::codec_error(operation, Some(id), &e))?;
        let request = HttpRequest::builder(operation.default_http_method(), path)
            .body(body)
            .build()
            .map_err(|e| {
                ResourceError::from_http_error(e.into(), R::NAME, operation.as_str(), Some(id))
            })?;

        let response = self.send(ctx, operation, Some(id), request).await?;
        Self::decode_entity(operation, Some(id), response.body)
    }

    /// Deletes an entity by id or unique name.
    ///
    /// The gateway answers `204` whether or not the entity exists, so the
    /// entity is looked up first and a missing one is reported as
    /// [`ResourceError::NotFound`]. Use [`ResourceError::is_not_found`] to
    /// treat it as already gone. An entity removed by someone else between
    /// the lookup and the delete is still reported as deleted.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] for an empty identifier
    /// - [`ResourceError::NotFound`] if nothing matches
    /// - [`ResourceError::Transport`] / [`ResourceError::Canceled`]
    pub async fn delete(&self, ctx: &RequestContext, id_or_name: &str) -> Result<(), ResourceError> {
        let operation = ResourceOperation::Delete;
        Self::require_identifier(operation, "id", id_or_name)?;

        self.fetch(ctx, operation, id_or_name).await?;

        let path = Self::resolve(operation, &Self::entity_ids(id_or_name))?;
        let request = Self::bodyless(operation, path, Vec::new(), Some(id_or_name))?;
        self.send(ctx, operation, Some(id_or_name), request).await?;
        Ok(())
    }

    /// Fetches one page of the collection.
    ///
    /// Pass `None` (or options without an offset) for the first page, then
    /// the options returned with each page until they are `None`.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Validation`] for a page size outside `1..=1000`, or
    ///   when the gateway rejects the offset
    /// - [`ResourceError::Transport`] / [`ResourceError::Canceled`]
    pub async fn list(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<Page<R>, ResourceError> {
        self.list_in(ctx, None, options).await
    }

    /// Fetches one page of a nested collection, e.g. the routes of one
    /// service.
    ///
    /// # Errors
    ///
    /// As [`list`](Self::list), plus [`ResourceError::NotFound`] naming the
    /// parent when it does not exist, and
    /// [`ResourceError::PathResolutionFailed`] if `R` has no nested path for
    /// `parent_id_name`.
    pub async fn list_with_parent(
        &self,
        ctx: &RequestContext,
        parent_id_name: &str,
        parent_id: &str,
        options: Option<&ListOptions>,
    ) -> Result<Page<R>, ResourceError> {
        Self::require_identifier(ResourceOperation::List, parent_id_name, parent_id)?;
        self.list_in(ctx, Some((parent_id_name, parent_id)), options)
            .await
    }

    /// Walks every page from `options` to the end and concatenates them.
    ///
    /// # Errors
    ///
    /// The first error from any page; pages already fetched are discarded.
    /// A gateway handing back the offset it was just sent is reported as
    /// [`ResourceError::InvalidResponse`].
    pub async fn list_all(
        &self,
        ctx: &RequestContext,
        options: Option<&ListOptions>,
    ) -> Result<Vec<R>, ResourceError> {
        let mut all = Vec::new();
        let mut sent = options.and_then(|o| o.offset.clone());
        let mut page = self.list(ctx, options).await?;
        loop {
            let (items, next) = page.into_parts();
            all.extend(items);
            let Some(next) = next else {
                break;
            };
            if next.offset == sent {
                return Err(ResourceError::InvalidResponse {
                    resource: R::NAME,
                    operation: ResourceOperation::List.as_str(),
                    id: None,
                    message: "gateway returned the offset it was sent".to_string(),
                });
            }
            tracing::debug!(resource = R::NAME, fetched = all.len(), "fetching next page");
            sent.clone_from(&next.offset);
            page = self.list(ctx, Some(&next)).await?;
        }
        Ok(all)
    }

    async fn list_in(
        &self,
        ctx: &RequestContext,
        parent: Option<(&str, &str)>,
        options: Option<&ListOptions>,
    ) -> Result<Page<R>, ResourceError> {
        let operation = ResourceOperation::List;
        let default_options = ListOptions::default();
        let options = options.unwrap_or(&default_options);
        options.validate().map_err(|message| {
            ResourceError::invalid_field(R::NAME, operation.as_str(), "size", message)
        })?;

        let path = Self::resolve(operation, &Self::parent_ids(parent))?;
        let parent_id = parent.map(|(_, id)| id);
        let request = Self::bodyless(operation, path, options.to_query(), parent_id)?;

        let response = self
            .send(ctx, operation, parent_id, request)
            .await
            .map_err(|e| Self::attribute_to_parent(e, parent))?;
        let (items, offset) = decode_list::<R>(response.body)
            .map_err(|e| Self::codec_error(operation, parent_id, &e))?;

        tracing::debug!(
            resource = R::NAME,
            size = options.page_size(),
            count = items.len(),
            has_next = offset.is_some(),
            "listed page"
        );

        Ok(Page::new(items, offset.map(|o| options.next_page(o))))
    }

    /// GETs one entity, labelling errors with `operation`.
    async fn fetch(
        &self,
        ctx: &RequestContext,
        operation: ResourceOperation,
        id_or_name: &str,
    ) -> Result<HttpResponse, ResourceError> {
        let path = Self::resolve(ResourceOperation::Get, &Self::entity_ids(id_or_name))?;
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .build()
            .map_err(|e| {
                ResourceError::from_http_error(e.into(), R::NAME, operation.as_str(), Some(id_or_name))
            })?;
        self.send(ctx, operation, Some(id_or_name), request).await
    }

    /// Sends `request` and maps non-2xx responses to semantic errors.
    async fn send(
        &self,
        ctx: &RequestContext,
        operation: ResourceOperation,
        id: Option<&str>,
        request: HttpRequest,
    ) -> Result<HttpResponse, ResourceError> {
        if let Some(reason) = ctx.canceled() {
            return Err(ResourceError::Canceled {
                resource: R::NAME,
                operation: operation.as_str(),
                reason,
            });
        }

        let response = self
            .client
            .request(ctx, request)
            .await
            .map_err(|e| ResourceError::from_http_error(e, R::NAME, operation.as_str(), id))?;

        if !response.is_ok() {
            return Err(ResourceError::from_http_response(
                &response,
                R::NAME,
                operation.as_str(),
                id,
            ));
        }

        Ok(response)
    }

    fn entity_ids(id: &str) -> HashMap<&'static str, String> {
        let mut ids = HashMap::new();
        ids.insert("id", id.to_string());
        ids
    }

    fn parent_ids<'a>(parent: Option<(&'a str, &str)>) -> HashMap<&'a str, String> {
        let mut ids = HashMap::new();
        if let Some((name, id)) = parent {
            ids.insert(name, id.to_string());
        }
        ids
    }

    fn attribute_to_parent(error: ResourceError, parent: Option<(&str, &str)>) -> ResourceError {
        match parent {
            Some((name, id)) => error.with_parent(name, id),
            None => error,
        }
    }

    fn resolve(
        operation: ResourceOperation,
        ids: &HashMap<&str, String>,
    ) -> Result<String, ResourceError> {
        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(R::PATHS, operation, &available_ids)
            .filter(|p| p.id_count() == available_ids.len())
            .ok_or(ResourceError::PathResolutionFailed {
                resource: R::NAME,
                operation: operation.as_str(),
            })?;
        Ok(build_path(path.template, ids))
    }

    fn bodyless(
        operation: ResourceOperation,
        path: String,
        query: Vec<(String, String)>,
        id: Option<&str>,
    ) -> Result<HttpRequest, ResourceError> {
        HttpRequest::builder(operation.default_http_method(), path)
            .query(query)
            .build()
            .map_err(|e| ResourceError::from_http_error(e.into(), R::NAME, operation.as_str(), id))
    }

    fn require_identifier(
        operation: ResourceOperation,
        field: &str,
        value: &str,
    ) -> Result<(), ResourceError> {
        if value.trim().is_empty() {
            return Err(ResourceError::invalid_field(
                R::NAME,
                operation.as_str(),
                field,
                format!("{field} must not be empty"),
            ));
        }
        Ok(())
    }

    fn decode_entity(
        operation: ResourceOperation,
        id: Option<&str>,
        body: Value,
    ) -> Result<R, ResourceError> {
        serde_json::from_value(body).map_err(|e| Self::codec_error(operation, id, &e))
    }

    fn codec_error(
        operation: ResourceOperation,
        id: Option<&str>,
        error: &serde_json::Error,
    ) -> ResourceError {
        ResourceError::InvalidResponse {
            resource: R::NAME,
            operation: operation.as_str(),
            id: id.map(ToString::to_string),
            message: error.to_string(),
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceService<'static, crate::admin::resources::Consumer>>();
};
