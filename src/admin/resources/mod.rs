//! Admin API entity types.
//!
//! Each type implements [`Resource`](crate::admin::Resource) and is used
//! through [`ResourceService`](crate::admin::ResourceService):
//!
//! ```rust,ignore
//! use kong_admin::admin::resources::{Consumer, Route, Service};
//!
//! let service = client.services().create(&ctx, &Service::new("billing", "billing.internal")).await?;
//! let service_id = service.id.as_deref().unwrap_or_default();
//! client.routes().create_for_service(&ctx, service_id, &Route::for_service(service_id, ["/billing"])).await?;
//! let consumer = client.consumers().create(&ctx, &Consumer::with_username("alice")).await?;
//! ```

mod consumer;
mod route;
mod service;

pub use consumer::Consumer;
pub use route::{Route, ServiceRef};
pub use service::Service;
