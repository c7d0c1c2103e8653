//! Port for durable item storage.
//!
//! Adapters own the mapping between [`Item`] and its storage layout, including
//! the one-to-many photo relationship. A save is all-or-nothing: the item row
//! and every photo row become visible together or not at all.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Item, ItemId, StoredItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by item repository adapters.
    pub enum ItemRepositoryError {
        /// Another item already uses this code.
        DuplicateCode { code: String } => "the item code must be unique",
        /// No item exists with this identifier.
        NotFound { id: i64 } => "item {id} not found",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "item repository connection failed: {message}",
        /// Query or transaction failed during execution.
        Query { message: String } =>
            "item repository query failed: {message}",
        /// The caller's deadline elapsed before the store answered.
        Timeout { message: String } =>
            "item repository deadline exceeded: {message}",
    }
}

/// Port for persisting and loading items with their photos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist an item and its photos atomically.
    ///
    /// The returned item carries the store-assigned id and a single creation
    /// timestamp shared by the item and all of its photos. A code collision
    /// fails with [`ItemRepositoryError::DuplicateCode`].
    async fn save(&self, item: &Item) -> Result<StoredItem, ItemRepositoryError>;

    /// Load an item with its full photo collection.
    ///
    /// Unknown ids fail with [`ItemRepositoryError::NotFound`].
    async fn find_by_id(&self, id: ItemId) -> Result<StoredItem, ItemRepositoryError>;
}

/// Fixture implementation for wiring without a database.
///
/// Saves echo the item back with id `1`; lookups never find anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemRepository;

#[async_trait]
impl ItemRepository for FixtureItemRepository {
    async fn save(&self, item: &Item) -> Result<StoredItem, ItemRepositoryError> {
        let id = ItemId::new(1).map_err(|err| ItemRepositoryError::query(err.to_string()))?;
        let now = Utc::now();
        Ok(StoredItem::new(id, item.clone(), now, now))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<StoredItem, ItemRepositoryError> {
        Err(ItemRepositoryError::not_found(id.get()))
    }
}
