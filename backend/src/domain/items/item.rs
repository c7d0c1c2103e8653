//! Item entity and its persisted form.

use chrono::{DateTime, Utc};

use super::{ItemId, ItemStatus, ItemType};

/// Candidate item as received from an inbound adapter.
///
/// Field presence and basic typing are the adapter's job; business rules are
/// applied later by [`super::validate_item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Listing code; unique across the store.
    pub code: String,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Price in minor currency units.
    pub price: i64,
    /// Units on hand; drives the derived status.
    pub stock: i64,
    /// Whether the marketplace or a third party sells the item.
    pub item_type: ItemType,
    /// Leader flag for seller listings.
    pub leader: bool,
    /// Raw tier name, checked only for leader sellers.
    pub leader_level: String,
    /// Photo URLs in submission order.
    pub photos: Vec<String>,
}

/// Item aggregate before the store assigns identity.
///
/// ## Invariants
/// - `status` always matches [`ItemStatus::from_stock`] for `stock`.
/// - `leader_level` is kept verbatim until validation; only seller listings
///   have it checked or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    code: String,
    title: String,
    description: String,
    price: i64,
    stock: i64,
    item_type: ItemType,
    leader: bool,
    leader_level: String,
    status: ItemStatus,
    photos: Vec<String>,
}

impl Item {
    /// Build an item from a draft, deriving its status from stock.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::{Item, ItemDraft, ItemStatus, ItemType};
    ///
    /// let item = Item::from_draft(ItemDraft {
    ///     code: "sa4123".into(),
    ///     title: "my-title".into(),
    ///     description: "my-description".into(),
    ///     price: 50,
    ///     stock: 0,
    ///     item_type: ItemType::Own,
    ///     leader: false,
    ///     leader_level: String::new(),
    ///     photos: vec!["url1".into()],
    /// });
    /// assert_eq!(item.status(), ItemStatus::Inactive);
    /// ```
    pub fn from_draft(draft: ItemDraft) -> Self {
        let ItemDraft {
            code,
            title,
            description,
            price,
            stock,
            item_type,
            leader,
            leader_level,
            photos,
        } = draft;

        let mut item = Self {
            code,
            title,
            description,
            price,
            stock,
            item_type,
            leader,
            leader_level,
            status: ItemStatus::Inactive,
            photos,
        };
        item.derive_status();
        item
    }

    /// Rehydrate an item whose fields were already validated and stored.
    ///
    /// The stored status is trusted as-is so reads reflect what was written.
    pub(crate) fn from_stored(draft: ItemDraft, status: ItemStatus) -> Self {
        let mut item = Self::from_draft(draft);
        item.status = status;
        item
    }

    /// Recompute `status` from `stock`. Idempotent.
    pub fn derive_status(&mut self) {
        self.status = ItemStatus::from_stock(self.stock);
    }

    pub(super) fn clear_leader_level(&mut self) {
        self.leader_level.clear();
    }

    /// Unique listing code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price in minor currency units.
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Units on hand.
    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Listing origin.
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// Whether the seller is flagged as a leader.
    pub fn leader(&self) -> bool {
        self.leader
    }

    /// Raw leader level; empty when unset or cleared.
    pub fn leader_level(&self) -> &str {
        &self.leader_level
    }

    /// Status derived from stock, or as stored for rehydrated items.
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    /// Photo URLs in submission order.
    pub fn photos(&self) -> &[String] {
        &self.photos
    }
}

/// Item with store-assigned identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    id: ItemId,
    item: Item,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredItem {
    /// Combine an item with the identity assigned by a store.
    pub fn new(
        id: ItemId,
        item: Item,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item,
            created_at,
            updated_at,
        }
    }

    /// Identifier assigned on save.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// The persisted item fields.
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Instant the item was first written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Instant of the last write; equal to `created_at` for new items.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Split into the item and its identity.
    pub fn into_item(self) -> Item {
        self.item
    }
}
