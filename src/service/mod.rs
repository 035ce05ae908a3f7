//! Entity Service - the validating layer between callers and a store.
//!
//! Handlers (HTTP, CLI, loaders) talk to an `EntityService`; the service
//! checks input with the validation layer and then calls the injected
//! `Store`. Failures come back as a `ServiceError` whose `kind()` and
//! `status_code()` let a transport map them without matching variants.

mod entity_service;
mod error;

pub use entity_service::EntityService;
pub use error::{ErrorKind, ServiceError};
