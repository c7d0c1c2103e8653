//! PostgreSQL-backed `ItemRepository` implementation using Diesel ORM.
//!
//! An item and its photos are written in one transaction with a single
//! timestamp. Reads run in a read-only `REPEATABLE READ` transaction so the
//! item row and its photos come from the same snapshot.

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound as _, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemDraft, ItemId, ItemStatus, ItemType, StoredItem};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{ItemRow, NewItemRow, NewPhotoRow};
use super::pool::{DbPool, PoolError};
use super::schema::{items, photos};

/// Diesel-backed implementation of the `ItemRepository` port.
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    from_failure(classify_pool_error(error), None)
}

fn from_failure(failure: StoreFailure, code: Option<&str>) -> ItemRepositoryError {
    match (failure, code) {
        (StoreFailure::UniqueViolation { .. }, Some(code)) => {
            ItemRepositoryError::duplicate_code(code)
        }
        (StoreFailure::UniqueViolation { constraint }, None) => ItemRepositoryError::query(
            format!("unexpected unique violation on {}", constraint.unwrap_or_default()),
        ),
        (StoreFailure::Connection(message), _) => ItemRepositoryError::connection(message),
        (StoreFailure::Query(message), _) => ItemRepositoryError::query(message),
    }
}

/// Current time at the microsecond precision `TIMESTAMPTZ` keeps, so the
/// returned item matches what a later read produces.
fn storage_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn new_item_row(item: &Item, now: DateTime<Utc>) -> NewItemRow<'_> {
    NewItemRow {
        code: item.code(),
        title: item.title(),
        description: item.description(),
        price: item.price(),
        stock: item.stock(),
        item_type: item.item_type().as_str(),
        leader: item.leader(),
        leader_level: item.leader_level(),
        status: item.status().as_str(),
        created_at: now,
        updated_at: now,
    }
}

/// Rebuild a stored item from its row and ordered photo paths.
fn row_to_stored_item(row: ItemRow, photos: Vec<String>) -> Result<StoredItem, ItemRepositoryError> {
    let corrupt = |what: &str, value: &str| {
        ItemRepositoryError::query(format!("item {} has unreadable {what}: {value}", row.id))
    };

    let id = ItemId::new(row.id).map_err(|_| corrupt("id", &row.id.to_string()))?;
    let item_type = row
        .item_type
        .parse::<ItemType>()
        .map_err(|_| corrupt("item_type", &row.item_type))?;
    let status = row
        .status
        .parse::<ItemStatus>()
        .map_err(|_| corrupt("status", &row.status))?;

    let item = Item::from_stored(
        ItemDraft {
            code: row.code,
            title: row.title,
            description: row.description,
            price: row.price,
            stock: row.stock,
            item_type,
            leader: row.leader,
            leader_level: row.leader_level,
            photos,
        },
        status,
    );

    Ok(StoredItem::new(id, item, row.created_at, row.updated_at))
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn save(&self, item: &Item) -> Result<StoredItem, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let now = storage_timestamp();

        let item_id = conn
            .transaction(|conn| {
                async move {
                    let id: i64 = diesel::insert_into(items::table)
                        .values(&new_item_row(item, now))
                        .returning(items::id)
                        .get_result(conn)
                        .await?;

                    let photo_rows: Vec<NewPhotoRow<'_>> = item
                        .photos()
                        .iter()
                        .map(|path| NewPhotoRow {
                            item_id: id,
                            path,
                            created_at: now,
                            updated_at: now,
                        })
                        .collect();

                    if !photo_rows.is_empty() {
                        diesel::insert_into(photos::table)
                            .values(&photo_rows)
                            .execute(conn)
                            .await?;
                    }

                    Ok::<_, DieselError>(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| from_failure(classify_diesel_error(err), Some(item.code())))?;

        debug!(item_id, photo_count = item.photos().len(), "item row inserted");

        let id = ItemId::new(item_id)
            .map_err(|_| ItemRepositoryError::query(format!("store returned id {item_id}")))?;
        Ok(StoredItem::new(id, item.clone(), now, now))
    }

    async fn find_by_id(&self, id: ItemId) -> Result<StoredItem, ItemRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw_id = id.get();

        let found = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let Some(row) = items::table
                        .find(raw_id)
                        .select(ItemRow::as_select())
                        .first(conn)
                        .await
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let paths: Vec<String> = photos::table
                        .filter(photos::item_id.eq(raw_id))
                        .order_by(photos::id.asc())
                        .select(photos::path)
                        .load(conn)
                        .await?;

                    Ok::<_, DieselError>(Some((row, paths)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| from_failure(classify_diesel_error(err), None))?;

        let (row, paths) = found.ok_or_else(|| ItemRepositoryError::not_found(raw_id))?;
        row_to_stored_item(row, paths)
    }
}
