//! Store - abstract CRUD storage for records of one type.

use super::{Id, Record, StoreError};

/// Abstract CRUD storage for records.
///
/// Every read returns owned copies; callers never hold references into
/// storage.
pub trait Store<R: Record>: Send + Sync {
    /// Assign the next id and store a copy. Fails with `DuplicateKey` if the
    /// natural key is already taken.
    fn create(&self, record: R) -> Result<R, StoreError>;

    /// Create several records at once. Either all are stored or none.
    fn create_many(&self, records: Vec<R>) -> Result<Vec<R>, StoreError>;

    /// Get a record by id.
    fn get(&self, id: Id) -> Result<R, StoreError>;

    /// Snapshot of every record, in id order.
    fn get_all(&self) -> Result<Vec<R>, StoreError>;

    /// Replace an existing record wholesale.
    fn update(&self, record: R) -> Result<R, StoreError>;

    /// Apply typed field patches, in order, to an existing record.
    fn update_partial(&self, id: Id, patches: Vec<R::Patch>) -> Result<R, StoreError>;

    /// Remove a record.
    fn delete(&self, id: Id) -> Result<(), StoreError>;

    /// Records matching a predicate, in id order. `NotFoundMany` when empty.
    fn find_by(&self, predicate: &dyn Fn(&R) -> bool) -> Result<Vec<R>, StoreError>;

    /// Mean of `field` over the records matching `predicate`.
    fn aggregate(
        &self,
        predicate: &dyn Fn(&R) -> bool,
        field: &dyn Fn(&R) -> f64,
    ) -> Result<f64, StoreError>;

    /// Number of records matching a predicate. Zero is not an error.
    fn count(&self, predicate: &dyn Fn(&R) -> bool) -> Result<usize, StoreError>;

    /// Number of stored records.
    fn len(&self) -> Result<usize, StoreError>;

    /// `count(predicate)` and `len()` taken from the same snapshot.
    fn count_and_len(
        &self,
        predicate: &dyn Fn(&R) -> bool,
    ) -> Result<(usize, usize), StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}
