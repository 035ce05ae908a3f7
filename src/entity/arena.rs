//! Arena - dense record storage with id and natural key lookups.

use std::collections::{HashMap, HashSet};

use super::{Id, Record, StoreError};

/// Records live in a dense vector; `index` maps ids to slots and `keys`
/// maps natural keys to ids. Removal swaps the last slot into the hole.
/// `next_id` is `None` once `Id::MAX` has been handed out.
pub(crate) struct Arena<R> {
    slots: Vec<R>,
    index: HashMap<Id, usize>,
    keys: HashMap<String, Id>,
    next_id: Option<Id>,
}

impl<R: Record> Arena<R> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            keys: HashMap::new(),
            next_id: Some(1),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, id: Id) -> Option<&R> {
        self.index.get(&id).map(|&slot| &self.slots[slot])
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &R> {
        self.slots.iter()
    }

    /// Cloned records matching `predicate`, sorted by id.
    pub(crate) fn collect(&self, predicate: &dyn Fn(&R) -> bool) -> Vec<R> {
        let mut found: Vec<R> = self.iter().filter(|r| predicate(r)).cloned().collect();
        found.sort_by_key(|r| r.id());
        found
    }

    /// Fails if `record`'s natural key is held by a record other than `owner`.
    pub(crate) fn check_key(&self, record: &R, owner: Option<Id>) -> Result<(), StoreError> {
        let Some(key) = record.natural_key() else {
            return Ok(());
        };
        match self.keys.get(key) {
            Some(&holder) if Some(holder) != owner => Err(Self::key_taken(key)),
            _ => Ok(()),
        }
    }

    /// Checks a batch against the arena and against itself.
    pub(crate) fn check_batch(&self, records: &[R]) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for record in records {
            self.check_key(record, None)?;
            if let Some(key) = record.natural_key() {
                if !seen.insert(key) {
                    return Err(Self::key_taken(key));
                }
            }
        }
        Ok(())
    }

    /// Fails with `IdsExhausted` unless `count` fresh ids are still available.
    pub(crate) fn reserve(&self, count: usize) -> Result<(), StoreError> {
        let Some(extra) = count.checked_sub(1) else {
            return Ok(());
        };
        self.next_id
            .zip(Id::try_from(extra).ok())
            .and_then(|(next, extra)| next.checked_add(extra))
            .map(|_| ())
            .ok_or_else(StoreError::ids_exhausted::<R>)
    }

    /// Store a record under a fresh id. Callers check the natural key first.
    pub(crate) fn insert(&mut self, mut record: R) -> Result<R, StoreError> {
        let id = self.next_id.ok_or_else(StoreError::ids_exhausted::<R>)?;
        record.set_id(id);
        self.place(record.clone());
        Ok(record)
    }

    /// Store a record under the id it already carries.
    pub(crate) fn place(&mut self, record: R) {
        let id = record.id();
        if let Some(key) = record.natural_key() {
            self.keys.insert(key.to_owned(), id);
        }
        self.index.insert(id, self.slots.len());
        self.slots.push(record);
        self.next_id = match (self.next_id, id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    pub(crate) fn contains(&self, id: Id) -> bool {
        self.index.contains_key(&id)
    }

    /// Overwrite the record with the same id.
    pub(crate) fn replace(&mut self, record: R) -> Result<R, StoreError> {
        let id = record.id();
        let slot = *self
            .index
            .get(&id)
            .ok_or_else(|| StoreError::not_found::<R>(id))?;
        self.check_key(&record, Some(id))?;

        let previous = self.slots[slot].natural_key().map(str::to_owned);
        if previous.as_deref() != record.natural_key() {
            if let Some(old) = previous {
                self.keys.remove(&old);
            }
            if let Some(new) = record.natural_key() {
                self.keys.insert(new.to_owned(), id);
            }
        }

        self.slots[slot] = record.clone();
        Ok(record)
    }

    pub(crate) fn remove(&mut self, id: Id) -> Option<R> {
        let slot = self.index.remove(&id)?;
        let removed = self.slots.swap_remove(slot);
        if let Some(moved) = self.slots.get(slot) {
            self.index.insert(moved.id(), slot);
        }
        if let Some(key) = removed.natural_key() {
            self.keys.remove(key);
        }
        Some(removed)
    }

    fn key_taken(key: &str) -> StoreError {
        StoreError::duplicate::<R>(R::NATURAL_KEY.unwrap_or("natural_key"), key)
    }
}
