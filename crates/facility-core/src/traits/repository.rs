//! Generic repository trait for record storage.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic keyed store trait.
///
/// Each record type gets a strongly typed repository; record-specific queries
/// are declared on the extension traits in `facility-database`.
#[async_trait]
pub trait Repository<Entity, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Find a record by its key.
    async fn find_by_id(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// List all records in insertion order.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Insert a new record and return it.
    async fn create(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete a record by its key. Returns `true` if deleted.
    async fn delete(&self, id: &Id) -> AppResult<bool>;

    /// Count stored records.
    async fn count(&self) -> AppResult<u64>;
}
