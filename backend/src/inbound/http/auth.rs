//! Bearer-token authentication for protected handlers.
//!
//! Add [`BearerUser`] as a handler argument to require a valid
//! `Authorization: Bearer <token>` header. Tokens are resolved through the
//! [`crate::domain::ports::UserAccounts`] port held in [`HttpState`].

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthenticatedUser, Error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from a bearer token.
#[derive(Debug, Clone)]
pub struct BearerUser(pub AuthenticatedUser);

impl BearerUser {
    /// Unwrap the authenticated identity.
    pub fn into_inner(self) -> AuthenticatedUser {
        self.0
    }
}

/// Pull the token out of an `Authorization` header value.
fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;

    let token = value
        .get(..BEARER_PREFIX.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
        .and_then(|_| value.get(BEARER_PREFIX.len()..))
        .map(str::trim)
        .ok_or_else(|| Error::unauthorized("authorization scheme must be Bearer"))?;

    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token.to_owned())
}

impl FromRequest for BearerUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let token = token?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            state.users.authenticate(&token).await.map(Self)
        })
    }
}
