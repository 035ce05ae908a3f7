//! InMemoryStore - arena-backed store for services and tests.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::arena::Arena;
use super::{FieldPatch, Id, Record, Store, StoreError};

/// In-memory record store.
///
/// Mutations serialize on the write half of an `RwLock`; reads share the
/// read half. Clone-friendly via Arc: clones share storage.
pub struct InMemoryStore<R> {
    storage: Arc<RwLock<Arena<R>>>,
}

impl<R> Clone for InMemoryStore<R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<R: Record> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryStore<R> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Arena::new())),
        }
    }

    /// Create a store preloaded with records, keeping the ids they carry.
    ///
    /// Records with id `0` get fresh ids after every explicit id is placed.
    /// Repeated ids or natural keys fail with `DuplicateKey`.
    pub fn seed(records: impl IntoIterator<Item = R>) -> Result<Self, StoreError> {
        let mut arena = Arena::new();
        let (explicit, unassigned): (Vec<R>, Vec<R>) =
            records.into_iter().partition(|r| r.id() != 0);

        for record in explicit {
            if arena.contains(record.id()) {
                return Err(StoreError::duplicate::<R>("id", record.id().to_string()));
            }
            arena.check_key(&record, None)?;
            arena.place(record);
        }
        for record in unassigned {
            arena.check_key(&record, None)?;
            arena.insert(record)?;
        }

        debug!(collection = R::COLLECTION, count = arena.len(), "store seeded");
        Ok(Self {
            storage: Arc::new(RwLock::new(arena)),
        })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Arena<R>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Arena<R>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))
    }
}

impl<R: Record> Store<R> for InMemoryStore<R> {
    fn create(&self, record: R) -> Result<R, StoreError> {
        let mut arena = self.write()?;
        arena.check_key(&record, None)?;
        let stored = arena.insert(record)?;
        debug!(collection = R::COLLECTION, id = stored.id(), "record created");
        Ok(stored)
    }

    fn create_many(&self, records: Vec<R>) -> Result<Vec<R>, StoreError> {
        let mut arena = self.write()?;
        arena.check_batch(&records)?;
        arena.reserve(records.len())?;
        let stored = records
            .into_iter()
            .map(|r| arena.insert(r))
            .collect::<Result<Vec<R>, _>>()?;
        debug!(collection = R::COLLECTION, count = stored.len(), "records created");
        Ok(stored)
    }

    fn get(&self, id: Id) -> Result<R, StoreError> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<R>(id))
    }

    fn get_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.read()?.collect(&|_| true))
    }

    fn update(&self, record: R) -> Result<R, StoreError> {
        let stored = self.write()?.replace(record)?;
        debug!(collection = R::COLLECTION, id = stored.id(), "record replaced");
        Ok(stored)
    }

    fn update_partial(&self, id: Id, patches: Vec<R::Patch>) -> Result<R, StoreError> {
        let mut arena = self.write()?;
        let mut record = arena
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<R>(id))?;

        let fields: Vec<&'static str> = patches.iter().map(|p| p.field()).collect();
        for patch in patches {
            patch.apply(&mut record);
        }
        // Patches never move a record to another id.
        record.set_id(id);

        let stored = arena.replace(record)?;
        debug!(collection = R::COLLECTION, id, ?fields, "record patched");
        Ok(stored)
    }

    fn delete(&self, id: Id) -> Result<(), StoreError> {
        self.write()?
            .remove(id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        debug!(collection = R::COLLECTION, id, "record deleted");
        Ok(())
    }

    fn find_by(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError> {
        let found = self.read()?.collect(predicate);
        if found.is_empty() {
            return Err(StoreError::not_found_many::<R>());
        }
        Ok(found)
    }

    fn aggregate(
        &self,
        predicate: &dyn Fn(&R) -> bool,
        field: &dyn Fn(&R) -> f64,
    ) -> Result<f64, StoreError> {
        let arena = self.read()?;
        let (sum, matched) = arena
            .iter()
            .filter(|r| predicate(r))
            .fold((0.0, 0usize), |(sum, n), r| (sum + field(r), n + 1));

        if matched == 0 {
            return Err(StoreError::not_found_many::<R>());
        }
        Ok(sum / matched as f64)
    }

    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, StoreError> {
        Ok(self.read()?.iter().filter(|r| predicate(r)).count())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    fn count_and_len(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<(usize, usize), StoreError> {
        let arena = self.read()?;
        Ok((arena.iter().filter(|r| predicate(r)).count(), arena.len()))
    }
}
