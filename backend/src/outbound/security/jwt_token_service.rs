//! HS256 JWT implementation of the `TokenService` port.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{AccessToken, AuthenticatedUser, Email, User, UserId};

/// Value of the `keyType` claim on access tokens.
pub const ACCESS_KEY_TYPE: &str = "access";

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    /// User id as a decimal string.
    pub sub: String,
    /// Email at issue time.
    pub email: String,
    /// Always [`ACCESS_KEY_TYPE`].
    pub key_type: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Signs and validates access tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    /// Build a service from the signing secret and token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let secret = Zeroizing::new(secret.to_vec());
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            ttl,
        }
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| TokenError::issue("token lifetime out of range"))?;
        let claims = AccessClaims {
            sub: user.id().to_string(),
            email: user.email().as_str().to_owned(),
            key_type: ACCESS_KEY_TYPE.to_owned(),
            iat: now.timestamp(),
            exp: now.timestamp().saturating_add(ttl_secs),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::issue(err.to_string()))?;
        Ok(AccessToken::new(token, self.ttl.as_secs()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<AccessToken, TokenError> {
        self.issue_at(user, Utc::now())
    }

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<AccessClaims>(token, &self.decoding, &validation)
            .map_err(|err| TokenError::invalid(err.to_string()))?
            .claims;

        if claims.key_type != ACCESS_KEY_TYPE {
            return Err(TokenError::invalid(format!(
                "unexpected key type {}",
                claims.key_type
            )));
        }

        let id = claims
            .sub
            .parse::<i64>()
            .ok()
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| TokenError::invalid("subject is not a user id"))?;
        let email = Email::new(&claims.email).map_err(|err| TokenError::invalid(err.to_string()))?;

        Ok(AuthenticatedUser { id, email })
    }
}
