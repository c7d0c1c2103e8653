//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod item_command;
mod item_query;
mod item_repository;
mod password_hasher;
mod token_service;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use item_command::MockItemCommand;
pub use item_command::{FixtureItemCommand, ItemCommand};
#[cfg(test)]
pub use item_query::MockItemQuery;
pub use item_query::{FixtureItemQuery, ItemQuery};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{FixtureItemRepository, ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::{FixtureUserAccounts, UserAccounts};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
