//! Internal Diesel row structs.
//!
//! Row types never leave the persistence layer; repositories convert them to
//! domain values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{items, photos, users};

// ---------------------------------------------------------------------------
// Item models
// ---------------------------------------------------------------------------

/// Row struct for reading from the items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ItemRow {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub item_type: String,
    pub leader: bool,
    pub leader_level: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new item rows.
///
/// Timestamps are supplied by the caller so the item and its photos share one
/// instant.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub(crate) struct NewItemRow<'a> {
    pub code: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub stock: i64,
    pub item_type: &'a str,
    pub leader: bool,
    pub leader_level: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new photo rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = photos)]
pub(crate) struct NewPhotoRow<'a> {
    pub item_id: i64,
    pub path: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new accounts. Timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
}
