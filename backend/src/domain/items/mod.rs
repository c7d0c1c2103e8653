//! Marketplace item aggregate.
//!
//! An [`Item`] is a listing with an owned, ordered photo collection. Its
//! `status` is always derived from `stock` and never accepted from callers.
//! Identity and timestamps are assigned by the store, so a persisted item is
//! represented separately as a [`StoredItem`].

mod item;
mod validation;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use item::{Item, ItemDraft, StoredItem};
pub use validation::{ItemValidationError, validate_item};

/// Listing origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    /// Sold by the marketplace itself.
    Own,
    /// Sold by a third-party seller.
    Seller,
}

impl ItemType {
    /// Canonical upper-case representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Own => "OWN",
            Self::Seller => "SELLER",
        }
    }
}

/// Error returned when parsing an unknown item type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type: {0}")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWN" => Ok(Self::Own),
            "SELLER" => Ok(Self::Seller),
            other => Err(UnknownItemType(other.to_owned())),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Availability flag derived from stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// At least one unit in stock.
    Active,
    /// Nothing in stock.
    Inactive,
}

impl ItemStatus {
    /// Derive the status for a stock level.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::ItemStatus;
    ///
    /// assert_eq!(ItemStatus::from_stock(3), ItemStatus::Active);
    /// assert_eq!(ItemStatus::from_stock(0), ItemStatus::Inactive);
    /// ```
    pub const fn from_stock(stock: i64) -> Self {
        if stock > 0 {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Canonical upper-case representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item status: {0}")]
pub struct UnknownItemStatus(pub String);

impl FromStr for ItemStatus {
    type Err = UnknownItemStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(UnknownItemStatus(other.to_owned())),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seller tier accepted for leader listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderLevel {
    /// Entry tier.
    Basic,
    /// Middle tier.
    Gold,
    /// Top tier.
    Platinum,
}

impl LeaderLevel {
    /// Parse an exact, case-sensitive tier name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "BASIC" => Some(Self::Basic),
            "GOLD" => Some(Self::Gold),
            "PLATINUM" => Some(Self::Platinum),
            _ => None,
        }
    }

    /// Canonical upper-case representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }
}

/// Store-assigned item identifier.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(i64);

/// Error returned for zero or negative identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("item id must be a positive integer, got {0}")]
pub struct InvalidItemId(pub i64);

impl ItemId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::ItemId;
    ///
    /// assert!(ItemId::new(7).is_ok());
    /// assert!(ItemId::new(0).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, InvalidItemId> {
        if raw > 0 {
            Ok(Self(raw))
        } else {
            Err(InvalidItemId(raw))
        }
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
