//! Users API handlers.
//!
//! ```text
//! POST /api/v1/users {"email":"ada@example.com","password":"...","passwordConfirm":"..."}
//! POST /api/v1/users/login {"email":"ada@example.com","password":"..."}
//! GET  /api/v1/users/me    (Authorization: Bearer <token>)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AccessToken, AuthenticatedUser, Error, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, User, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerUser;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email; stored lower-cased.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// At least eight characters.
    pub password: String,
    /// Must equal `password`.
    pub password_confirm: String,
}

/// Request body for `POST /api/v1/users/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email, matched case-insensitively.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Store-assigned identifier.
    pub id: i64,
    /// Normalised email.
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            email: user.email().as_str().to_owned(),
        }
    }
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id.get(),
            email: user.email.as_str().to_owned(),
        }
    }
}

/// Access token issued on login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Signed JWT for the `Authorization` header.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: u64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            access_token: token.as_str().to_owned(),
            token_type: "Bearer".to_owned(),
            expires_in: token.expires_in_secs(),
        }
    }
}

fn field_error(message: String, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn email_error(err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyEmail => "empty_email",
        _ => "invalid_email",
    };
    field_error(err.to_string(), "email", code)
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    match &err {
        RegistrationValidationError::Email(inner) => email_error(inner),
        RegistrationValidationError::PasswordTooShort { .. } => {
            field_error(err.to_string(), "password", "password_too_short")
        }
        RegistrationValidationError::PasswordMismatch => {
            field_error(err.to_string(), "passwordConfirm", "password_mismatch")
        }
    }
}

fn map_login_error(err: LoginValidationError) -> Error {
    match &err {
        LoginValidationError::Email(inner) => email_error(inner),
        LoginValidationError::EmptyPassword => {
            field_error(err.to_string(), "password", "empty_password")
        }
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Account storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        email,
        password,
        password_confirm,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&email, &password, &password_confirm)
        .map_err(map_registration_error)?;

    let user = state.users.register(registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password).map_err(map_login_error)?;

    let token = state.users.login(credentials).await?;
    Ok(web::Json(TokenResponse::from(token)))
}

/// Return the account behind the bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("BearerAuth" = []))
)]
#[get("/users/me")]
pub async fn me(user: BearerUser) -> ApiResult<web::Json<UserResponse>> {
    Ok(web::Json(UserResponse::from(user.into_inner())))
}

#[cfg(test)]
mod tests;
