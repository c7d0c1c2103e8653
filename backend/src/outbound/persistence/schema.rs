//! Diesel table definitions for the PostgreSQL schema.
//!
//! Keep in step with `backend/migrations`; `diesel print-schema` regenerates
//! these from a live database.

diesel::table! {
    /// Marketplace listings. `code` carries a unique constraint.
    items (id) {
        id -> Int8,
        code -> Varchar,
        title -> Varchar,
        description -> Text,
        price -> Int8,
        stock -> Int8,
        /// `OWN` or `SELLER`.
        item_type -> Varchar,
        leader -> Bool,
        /// Empty unless the item is a leader seller listing.
        leader_level -> Varchar,
        /// `ACTIVE` or `INACTIVE`, derived from stock before insert.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Photo references owned by an item; removed with their item.
    photos (id) {
        id -> Int8,
        item_id -> Int8,
        path -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts keyed by lower-case email.
    users (id) {
        id -> Int8,
        email -> Varchar,
        /// PHC string produced by the password hasher.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(photos -> items (item_id));

diesel::allow_tables_to_appear_in_same_query!(items, photos, users);
