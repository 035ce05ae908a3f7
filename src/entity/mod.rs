//! Entities - typed records with store-assigned integer ids.
//!
//! A record type names its collection, exposes its id, and optionally a
//! natural key that must stay unique across the collection. Updatable fields
//! are described by a companion patch enum so partial updates stay typed.
//!
//! ## Example
//!
//! ```ignore
//! use entity_store::{InMemoryStore, Store};
//! use entity_store::domain::{Product, ProductPatch};
//!
//! let store = InMemoryStore::<Product>::new();
//! let stored = store.create(product)?;
//! store.update_partial(stored.id, vec![ProductPatch::Price(12.5)])?;
//! let cheap = store.find_by(&|p| p.price < 20.0)?;
//! ```

mod arena;
mod in_memory;
mod store;

use serde_json::Value;
use thiserror::Error;

use crate::validate::ValidationError;

/// Store-assigned record identifier. `0` means "not yet assigned".
pub type Id = u64;

/// Trait for types that can be kept in an entity store.
pub trait Record: Clone + Send + Sync + 'static {
    /// Collection name, used in errors and log fields (e.g. "products").
    const COLLECTION: &'static str;

    /// Name of the natural key field, if the type has one.
    const NATURAL_KEY: Option<&'static str> = None;

    /// Typed single-field update for this record.
    type Patch: FieldPatch<Self>;

    fn id(&self) -> Id;

    fn set_id(&mut self, id: Id);

    /// Value of the natural key. Must return `Some` exactly when
    /// `NATURAL_KEY` is set.
    fn natural_key(&self) -> Option<&str> {
        None
    }
}

/// A typed update of one record field.
pub trait FieldPatch<R>: Sized {
    /// Name of the field this patch writes.
    fn field(&self) -> &'static str;

    /// Write the carried value into `record`.
    fn apply(self, record: &mut R);

    /// Decode a patch from a field name and an untyped JSON value.
    ///
    /// Returns `Ok(None)` when `field` does not name an updatable field, and
    /// `InvalidField` when it does but the value has the wrong shape.
    fn decode(field: &str, value: &Value) -> Result<Option<Self>, ValidationError>;
}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this id.
    #[error("{collection} not found: {id}")]
    NotFound { collection: &'static str, id: Id },
    /// A filtered lookup matched nothing.
    #[error("no {collection} matched the query")]
    NotFoundMany { collection: &'static str },
    /// Natural key (or seeded id) already taken.
    #[error("{collection} with {field} {value:?} already exists")]
    DuplicateKey {
        collection: &'static str,
        field: &'static str,
        value: String,
    },
    /// Every id up to `Id::MAX` has been assigned.
    #[error("{collection} has no ids left to assign")]
    IdsExhausted { collection: &'static str },
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn not_found<R: Record>(id: Id) -> Self {
        StoreError::NotFound {
            collection: R::COLLECTION,
            id,
        }
    }

    pub(crate) fn not_found_many<R: Record>() -> Self {
        StoreError::NotFoundMany {
            collection: R::COLLECTION,
        }
    }

    pub(crate) fn ids_exhausted<R: Record>() -> Self {
        StoreError::IdsExhausted {
            collection: R::COLLECTION,
        }
    }

    pub(crate) fn duplicate<R: Record>(field: &'static str, value: impl Into<String>) -> Self {
        StoreError::DuplicateKey {
            collection: R::COLLECTION,
            field,
            value: value.into(),
        }
    }
}

pub use in_memory::InMemoryStore;
pub use store::Store;
