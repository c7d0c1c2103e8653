//! Business rules applied to a candidate item before it is persisted.

use super::{Item, ItemType, LeaderLevel};

/// Reasons a candidate item is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemValidationError {
    /// A leader seller listing carried an unknown tier.
    #[error("leader level is not valid: {value}")]
    InvalidLeaderLevel {
        /// The rejected tier, as submitted.
        value: String,
    },
    /// The listing has no photos.
    #[error("photos must contain at least one entry")]
    MissingPhotos,
}

/// Validate a candidate whose status has already been derived.
///
/// Rules run in a fixed order: the leader-level gate for seller listings,
/// then the photo requirement. A non-leader seller listing has its leader
/// level cleared. `OWN` listings keep whatever leader level they carried.
///
/// # Examples
/// ```
/// use marketplace::domain::{Item, ItemDraft, ItemType, ItemValidationError, validate_item};
///
/// let item = Item::from_draft(ItemDraft {
///     code: "sa4123".into(),
///     title: "t".into(),
///     description: "d".into(),
///     price: 50,
///     stock: 1,
///     item_type: ItemType::Seller,
///     leader: true,
///     leader_level: "DIAMOND".into(),
///     photos: vec!["url1".into()],
/// });
/// let err = validate_item(item).unwrap_err();
/// assert_eq!(err, ItemValidationError::InvalidLeaderLevel { value: "DIAMOND".into() });
/// ```
pub fn validate_item(mut item: Item) -> Result<Item, ItemValidationError> {
    if item.item_type() == ItemType::Seller {
        if item.leader() {
            if LeaderLevel::parse(item.leader_level()).is_none() {
                return Err(ItemValidationError::InvalidLeaderLevel {
                    value: item.leader_level().to_owned(),
                });
            }
        } else {
            item.clear_leader_level();
        }
    }

    if item.photos().is_empty() {
        return Err(ItemValidationError::MissingPhotos);
    }

    Ok(item)
}
