//! Credential adapters: password hashing and signed access tokens.

mod argon2_password_hasher;
mod jwt_token_service;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_token_service::{ACCESS_KEY_TYPE, AccessClaims, JwtTokenService};
