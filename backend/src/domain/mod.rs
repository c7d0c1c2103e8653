//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed marketplace entities and the use-cases that
//! operate on them. Nothing here knows about HTTP or SQL; adapters reach the
//! domain only through [`ports`].
//!
//! Public surface:
//! - Item, ItemDraft, StoredItem and friends — the item aggregate.
//! - validate_item — business rules for candidate items.
//! - ItemService / ItemWorkflowError — the item create/lookup workflow.
//! - User, Email, Registration, LoginCredentials — account primitives.
//! - UserAccountService — registration, login, and token authentication.
//! - Error / ErrorCode — transport-agnostic error payload.

pub mod auth;
pub mod error;
pub mod item_service;
pub mod items;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{
    AccessToken, AuthenticatedUser, LoginCredentials, LoginValidationError, MIN_PASSWORD_LEN,
    Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::item_service::{ItemService, ItemWorkflowError};
pub use self::items::{
    InvalidItemId, Item, ItemDraft, ItemId, ItemStatus, ItemType, ItemValidationError,
    LeaderLevel, StoredItem, UnknownItemStatus, UnknownItemType, validate_item,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, NewUser, User, UserId, UserValidationError};
pub use self::user_account_service::UserAccountService;
