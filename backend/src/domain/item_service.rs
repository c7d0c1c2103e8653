//! Item workflow: status derivation, validation, and persistence.
//!
//! [`ItemService`] is the single entry point inbound adapters use to create
//! and look up items. It holds no state between calls beyond its repository
//! handle; uniqueness is left entirely to the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{ItemCommand, ItemQuery, ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemDraft, ItemId, ItemValidationError, StoredItem, validate_item};

/// Outcome taxonomy for item operations.
///
/// Adapters switch on the variant to choose a response; the workflow never
/// adds classifications beyond what validation and the store report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemWorkflowError {
    /// The candidate broke a business rule. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ItemValidationError),
    /// Another item already uses this code.
    #[error("the item code must be unique")]
    DuplicateCode {
        /// The conflicting code.
        code: String,
    },
    /// No item has this identifier.
    #[error("item {id} not found")]
    NotFound {
        /// The identifier that was looked up.
        id: ItemId,
    },
    /// Any other storage failure, with its cause attached.
    #[error("item storage failed: {0}")]
    Storage(ItemRepositoryError),
}

impl ItemWorkflowError {
    fn from_repository(error: ItemRepositoryError, id: Option<ItemId>) -> Self {
        match (error, id) {
            (ItemRepositoryError::DuplicateCode { code }, _) => Self::DuplicateCode { code },
            (ItemRepositoryError::NotFound { .. }, Some(id)) => Self::NotFound { id },
            (other, _) => Self::Storage(other),
        }
    }
}

/// Item workflow service implementing the item driving ports.
#[derive(Clone)]
pub struct ItemService<R> {
    item_repo: Arc<R>,
    deadline: Option<Duration>,
}

impl<R> ItemService<R> {
    /// Create a service backed by `item_repo`, with no deadline.
    pub fn new(item_repo: Arc<R>) -> Self {
        Self {
            item_repo,
            deadline: None,
        }
    }

    /// Bound every store call by `deadline`.
    ///
    /// An elapsed deadline drops the in-flight store future, which abandons
    /// any open transaction, and reports [`ItemRepositoryError::Timeout`].
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    async fn within_deadline<T, F>(&self, operation: &str, fut: F) -> Result<T, ItemRepositoryError>
    where
        F: Future<Output = Result<T, ItemRepositoryError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fut).await.unwrap_or_else(|_| {
                warn!(operation, ?deadline, "item store deadline elapsed");
                Err(ItemRepositoryError::timeout(format!(
                    "{operation} exceeded {}ms",
                    deadline.as_millis()
                )))
            }),
            None => fut.await,
        }
    }
}

impl<R> ItemService<R>
where
    R: ItemRepository,
{
    /// Derive status, validate, then persist a candidate item.
    ///
    /// Validation failures return before the store is touched.
    pub async fn create(&self, draft: ItemDraft) -> Result<StoredItem, ItemWorkflowError> {
        let candidate = Item::from_draft(draft);
        debug!(item_code = candidate.code(), status = %candidate.status(), "creating item");

        let item = validate_item(candidate).inspect_err(|err| {
            debug!(error = %err, "item rejected by validation");
        })?;

        let stored = self
            .within_deadline("save", self.item_repo.save(&item))
            .await
            .map_err(|err| {
                warn!(item_code = item.code(), error = %err, "item save failed");
                ItemWorkflowError::from_repository(err, None)
            })?;

        debug!(item_id = %stored.id(), "item created");
        Ok(stored)
    }

    /// Look up an item by id.
    pub async fn get(&self, id: ItemId) -> Result<StoredItem, ItemWorkflowError> {
        self.within_deadline("find_by_id", self.item_repo.find_by_id(id))
            .await
            .map_err(|err| {
                debug!(item_id = %id, error = %err, "item lookup failed");
                ItemWorkflowError::from_repository(err, Some(id))
            })
    }
}

#[async_trait]
impl<R> ItemCommand for ItemService<R>
where
    R: ItemRepository,
{
    async fn create_item(&self, draft: ItemDraft) -> Result<StoredItem, ItemWorkflowError> {
        self.create(draft).await
    }
}

#[async_trait]
impl<R> ItemQuery for ItemService<R>
where
    R: ItemRepository,
{
    async fn get_item(&self, id: ItemId) -> Result<StoredItem, ItemWorkflowError> {
        self.get(id).await
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
