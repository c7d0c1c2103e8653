//! Driving port for item creation.

use async_trait::async_trait;

use crate::domain::{Item, ItemDraft, ItemId, ItemWorkflowError, StoredItem, validate_item};

/// Driving port for item write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemCommand: Send + Sync {
    /// Derive status, validate, and persist a candidate item.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use marketplace::domain::{ItemDraft, ItemType};
    /// # use marketplace::domain::ports::{FixtureItemCommand, ItemCommand};
    /// # async fn example() -> Result<(), marketplace::domain::ItemWorkflowError> {
    /// let stored = FixtureItemCommand
    ///     .create_item(ItemDraft {
    ///         code: "sa4123".into(),
    ///         title: "my-title".into(),
    ///         description: "my-description".into(),
    ///         price: 50,
    ///         stock: 150,
    ///         item_type: ItemType::Seller,
    ///         leader: true,
    ///         leader_level: "PLATINUM".into(),
    ///         photos: vec!["url1".into()],
    ///     })
    ///     .await?;
    /// assert_eq!(stored.id().get(), 1);
    /// # Ok(())
    /// # }
    /// ```
    async fn create_item(&self, draft: ItemDraft) -> Result<StoredItem, ItemWorkflowError>;
}

/// Fixture command that validates but does not persist.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureItemCommand;

#[async_trait]
impl ItemCommand for FixtureItemCommand {
    async fn create_item(&self, draft: ItemDraft) -> Result<StoredItem, ItemWorkflowError> {
        let item = validate_item(Item::from_draft(draft))?;
        let id = ItemId::new(1).map_err(|err| {
            ItemWorkflowError::Storage(super::ItemRepositoryError::query(err.to_string()))
        })?;
        let now = chrono::Utc::now();
        Ok(StoredItem::new(id, item, now, now))
    }
}
