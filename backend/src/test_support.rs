//! In-memory adapters for integration tests.
//!
//! Compiled only with the `test-support` feature. The repositories here keep
//! the same observable contract as the Diesel adapters (unique codes and
//! emails, store-assigned ids, one timestamp per save) without a database.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{ItemRepository, ItemRepositoryError, UserRepository, UserRepositoryError};
use crate::domain::{Email, Item, ItemId, NewUser, StoredItem, User, UserId};

#[derive(Debug, Default)]
struct ItemState {
    last_id: i64,
    items: BTreeMap<i64, StoredItem>,
    codes: HashSet<String>,
}

/// Item repository backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    state: Mutex<ItemState>,
}

impl InMemoryItemRepository {
    /// Empty store; the first save gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.state.lock().map_or(0, |state| state.items.len())
    }

    /// True when nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, ItemState>, ItemRepositoryError> {
        self.state
            .lock()
            .map_err(|_| ItemRepositoryError::query("item state lock poisoned"))
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn save(&self, item: &Item) -> Result<StoredItem, ItemRepositoryError> {
        let mut state = self.lock()?;
        if state.codes.contains(item.code()) {
            return Err(ItemRepositoryError::duplicate_code(item.code()));
        }

        let next = state.last_id + 1;
        let id = ItemId::new(next).map_err(|err| ItemRepositoryError::query(err.to_string()))?;
        let now = Utc::now();
        let stored = StoredItem::new(id, item.clone(), now, now);

        state.last_id = next;
        state.codes.insert(item.code().to_owned());
        state.items.insert(next, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<StoredItem, ItemRepositoryError> {
        self.lock()?
            .items
            .get(&id.get())
            .cloned()
            .ok_or_else(|| ItemRepositoryError::not_found(id.get()))
    }
}

#[derive(Debug, Default)]
struct UserState {
    last_id: i64,
    by_email: HashMap<String, User>,
}

/// User repository backed by a mutex-guarded map keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<UserState>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserState>, UserRepositoryError> {
        self.state
            .lock()
            .map_err(|_| UserRepositoryError::query("user state lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut state = self.lock()?;
        let key = user.email.as_str();
        if state.by_email.contains_key(key) {
            return Err(UserRepositoryError::duplicate_email(key));
        }

        let next = state.last_id + 1;
        let id = UserId::new(next).map_err(|err| UserRepositoryError::query(err.to_string()))?;
        let now = Utc::now();
        let created = User::new(id, user.email.clone(), user.password_hash.clone(), now, now);

        state.last_id = next;
        state.by_email.insert(key.to_owned(), created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.lock()?.by_email.get(email.as_str()).cloned())
    }
}
