//! Tests for users API handlers.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::Utc;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{FixtureItemCommand, FixtureItemQuery, MockUserAccounts};
use crate::domain::{Email, UserId};
use crate::inbound::http::error::json_config;

fn state(users: MockUserAccounts) -> HttpState {
    HttpState::new(
        Arc::new(FixtureItemCommand),
        Arc::new(FixtureItemQuery),
        Arc::new(users),
    )
}

async fn send(state: HttpState, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(
                web::scope("/api/v1")
                    .service(register)
                    .service(login)
                    .service(me),
            ),
    )
    .await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    let status = res.status();
    (status, actix_test::read_body_json(res).await)
}

fn stored_user() -> User {
    let now = Utc::now();
    User::new(
        UserId::new(9).expect("positive id"),
        Email::new("ada@example.com").expect("valid email"),
        "$argon2id$stub",
        now,
        now,
    )
}

#[rstest]
#[actix_web::test]
async fn register_returns_created_account() {
    let mut users = MockUserAccounts::new();
    users
        .expect_register()
        .withf(|reg| reg.email().as_str() == "ada@example.com")
        .times(1)
        .returning(|_| Ok(stored_user()));

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "Ada@Example.com",
                "password": "longenough",
                "passwordConfirm": "longenough"
            })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 9, "email": "ada@example.com" }));
}

#[rstest]
#[case("ada@example.com", "short", "short", "password", "password_too_short")]
#[case("ada@example.com", "longenough", "different", "passwordConfirm", "password_mismatch")]
#[case("   ", "longenough", "longenough", "email", "empty_email")]
#[case("not-an-email", "longenough", "longenough", "email", "invalid_email")]
#[actix_web::test]
async fn register_rejects_invalid_input(
    #[case] email: &str,
    #[case] password: &str,
    #[case] confirm: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut users = MockUserAccounts::new();
    users.expect_register().times(0);

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": email,
                "password": password,
                "passwordConfirm": confirm
            })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn mismatched_passwords_use_fixed_message() {
    let (_, body) = send(
        state(MockUserAccounts::new()),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "ada@example.com",
                "password": "longenough",
                "passwordConfirm": "longenougH"
            })),
    )
    .await;

    assert_eq!(body["message"], "passwords do not match");
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_a_conflict() {
    let mut users = MockUserAccounts::new();
    users
        .expect_register()
        .returning(|_| Err(Error::conflict("the email must be unique")));

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "ada@example.com",
                "password": "longenough",
                "passwordConfirm": "longenough"
            })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "the email must be unique");
}

#[rstest]
#[actix_web::test]
async fn login_returns_bearer_token() {
    let mut users = MockUserAccounts::new();
    users
        .expect_login()
        .times(1)
        .returning(|_| Ok(AccessToken::new("signed.jwt.value", 300)));

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": "ada@example.com", "password": "longenough" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "accessToken": "signed.jwt.value",
            "tokenType": "Bearer",
            "expiresIn": 300
        })
    );
}

#[rstest]
#[actix_web::test]
async fn login_failures_are_unauthorised() {
    let mut users = MockUserAccounts::new();
    users
        .expect_login()
        .returning(|_| Err(Error::unauthorized("invalid credentials")));

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}

#[rstest]
#[actix_web::test]
async fn login_rejects_empty_password() {
    let mut users = MockUserAccounts::new();
    users.expect_login().times(0);

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": "ada@example.com", "password": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "empty_password");
}

#[rstest]
#[actix_web::test]
async fn me_returns_token_identity() {
    let mut users = MockUserAccounts::new();
    users
        .expect_authenticate()
        .withf(|token| token == "signed.jwt.value")
        .returning(|_| {
            Ok(AuthenticatedUser {
                id: UserId::new(9).expect("positive id"),
                email: Email::new("ada@example.com").expect("valid email"),
            })
        });

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header((header::AUTHORIZATION, "Bearer signed.jwt.value")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 9, "email": "ada@example.com" }));
}

#[rstest]
#[actix_web::test]
async fn me_requires_a_token() {
    let mut users = MockUserAccounts::new();
    users.expect_authenticate().times(0);

    let (status, body) = send(
        state(users),
        actix_test::TestRequest::get().uri("/api/v1/users/me"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
}
