//! Driving port for item lookups.

use async_trait::async_trait;

use crate::domain::{ItemId, ItemWorkflowError, StoredItem};

/// Driving port for item read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemQuery: Send + Sync {
    /// Fetch one item with its photos.
    async fn get_item(&self, id: ItemId) -> Result<StoredItem, ItemWorkflowError>;
}

/// Fixture query backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemQuery;

#[async_trait]
impl ItemQuery for FixtureItemQuery {
    async fn get_item(&self, id: ItemId) -> Result<StoredItem, ItemWorkflowError> {
        Err(ItemWorkflowError::NotFound { id })
    }
}
