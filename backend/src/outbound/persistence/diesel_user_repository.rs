//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NewUser, User, UserId};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn from_failure(failure: StoreFailure, email: &Email) -> UserRepositoryError {
    match failure {
        StoreFailure::UniqueViolation { .. } => UserRepositoryError::duplicate_email(email.as_str()),
        StoreFailure::Connection(message) => UserRepositoryError::connection(message),
        StoreFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = UserId::new(row.id)
        .map_err(|err| UserRepositoryError::query(format!("user row {}: {err}", row.id)))?;
    let email = Email::new(&row.email)
        .map_err(|err| UserRepositoryError::query(format!("user row {}: {err}", row.id)))?;
    Ok(User::new(
        id,
        email,
        row.password_hash,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| from_failure(classify_pool_error(err), &user.email))?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&NewUserRow {
                email: user.email.as_str(),
                password_hash: &user.password_hash,
            })
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| from_failure(classify_diesel_error(err), &user.email))?;

        row_to_user(row)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| from_failure(classify_pool_error(err), email))?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| from_failure(classify_diesel_error(err), email))?;

        row.map(row_to_user).transpose()
    }
}
