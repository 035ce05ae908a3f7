mod config;
pub mod domain;
mod entity;
mod filter;
mod service;
pub mod validate;

pub use config::{ServiceConfig, UnknownFields, ValidationRules};
pub use entity::{FieldPatch, Id, InMemoryStore, Record, Store, StoreError};
pub use filter::Filter;
pub use service::{EntityService, ErrorKind, ServiceError};
pub use validate::{Validate, ValidationError};
