//! Entity service - validates input, then delegates to a store.
//!
//! An `EntityService<R, S>` holds a store handle and a `ServiceConfig`.
//! Mutations run the record's validators first; a rejected record never
//! reaches the store. Store errors are passed through unchanged.
//!
//! ## Example
//!
//! ```ignore
//! use entity_store::{EntityService, InMemoryStore, Filter};
//! use entity_store::domain::Product;
//!
//! let service = EntityService::new(InMemoryStore::<Product>::new());
//! let stored = service.create(product)?;
//! let pricey = service.find(&Filter::gt(|p: &Product| p.price, 15.0))?;
//! ```

use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::ServiceError;
use crate::config::{ServiceConfig, UnknownFields, ValidationRules};
use crate::entity::{FieldPatch, Id, Record, Store, StoreError};
use crate::filter::Filter;
use crate::validate::{Validate, ValidationError};

/// Validating front for a record store.
pub struct EntityService<R, S> {
    store: S,
    config: ServiceConfig,
    _marker: PhantomData<fn() -> R>,
}

impl<R, S> EntityService<R, S>
where
    R: Record + Validate,
    R::Patch: Validate,
    S: Store<R>,
{
    /// Create a service with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self {
            store,
            config,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.config.rules
    }

    pub fn create(&self, record: R) -> Result<R, ServiceError> {
        self.check(&record)?;
        Ok(self.store.create(record)?)
    }

    /// Validate every record, then store them all or none.
    pub fn create_many(&self, records: Vec<R>) -> Result<Vec<R>, ServiceError> {
        for record in &records {
            self.check(record)?;
        }
        Ok(self.store.create_many(records)?)
    }

    pub fn get(&self, id: Id) -> Result<R, ServiceError> {
        Ok(self.store.get(id)?)
    }

    pub fn get_all(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.store.get_all()?)
    }

    pub fn update(&self, record: R) -> Result<R, ServiceError> {
        self.check(&record)?;
        Ok(self.store.update(record)?)
    }

    pub fn update_partial(&self, id: Id, patches: Vec<R::Patch>) -> Result<R, ServiceError> {
        for patch in &patches {
            self.check(patch)?;
        }
        Ok(self.store.update_partial(id, patches)?)
    }

    /// Partial update from untyped field/value pairs.
    ///
    /// Values of the wrong JSON type are `InvalidField`. Names that are not
    /// updatable fields follow `ServiceConfig::unknown_fields`.
    pub fn update_partial_fields(
        &self,
        id: Id,
        fields: &Map<String, Value>,
    ) -> Result<R, ServiceError> {
        let mut patches = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            match <R::Patch as FieldPatch<R>>::decode(name, value)? {
                Some(patch) => patches.push(patch),
                None => match self.config.unknown_fields {
                    UnknownFields::Ignore => {
                        debug!(collection = R::COLLECTION, id, field = %name, "ignoring unknown field");
                    }
                    UnknownFields::Reject => {
                        let err = ValidationError::invalid(name.as_str(), "unknown field");
                        warn!(collection = R::COLLECTION, id, field = %name, "rejected: {}", err);
                        return Err(err.into());
                    }
                },
            }
        }
        self.update_partial(id, patches)
    }

    pub fn delete(&self, id: Id) -> Result<(), ServiceError> {
        Ok(self.store.delete(id)?)
    }

    /// Records matching `filter`. `NotFoundMany` when none do.
    pub fn find(&self, filter: &Filter<R>) -> Result<Vec<R>, ServiceError> {
        Ok(self.store.find_by(&|r| filter.matches(r))?)
    }

    /// Mean of `field` over the records matching `filter`.
    pub fn average(
        &self,
        filter: &Filter<R>,
        field: impl Fn(&R) -> f64,
    ) -> Result<f64, ServiceError> {
        Ok(self.store.aggregate(&|r| filter.matches(r), &field)?)
    }

    pub fn count(&self, filter: &Filter<R>) -> Result<usize, ServiceError> {
        Ok(self.store.count(&|r| filter.matches(r))?)
    }

    /// Fraction of all records matching `filter`, in `[0, 1]`.
    /// `NotFoundMany` when the store is empty.
    pub fn share(&self, filter: &Filter<R>) -> Result<f64, ServiceError> {
        let (matched, total) = self.store.count_and_len(&|r| filter.matches(r))?;
        if total == 0 {
            return Err(ServiceError::Store(StoreError::NotFoundMany {
                collection: R::COLLECTION,
            }));
        }
        Ok(matched as f64 / total as f64)
    }

    fn check(&self, value: &impl Validate) -> Result<(), ServiceError> {
        value.validate(&self.config.rules).map_err(|err| {
            warn!(collection = R::COLLECTION, field = err.field(), "rejected: {}", err);
            ServiceError::from(err)
        })
    }
}

impl<R, S: Clone> Clone for EntityService<R, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}
