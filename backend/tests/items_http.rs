//! End-to-end HTTP flows over in-memory stores and real credential adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use marketplace::Trace;
use marketplace::domain::{ItemService, TRACE_ID_HEADER, UserAccountService};
use marketplace::inbound::http::configure_api;
use marketplace::inbound::http::state::HttpState;
use marketplace::outbound::security::{Argon2PasswordHasher, JwtTokenService};
use marketplace::test_support::{InMemoryItemRepository, InMemoryUserRepository};
use rstest::rstest;
use serde_json::{Value, json};

fn state() -> HttpState {
    let items = Arc::new(ItemService::new(Arc::new(InMemoryItemRepository::new())));
    let users = Arc::new(UserAccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenService::new(
            b"integration-secret",
            Duration::from_secs(300),
        )),
    ));
    HttpState::new(items.clone(), items, users)
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .wrap(Trace)
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    };
}

fn item_body() -> Value {
    json!({
        "code": "sa4123",
        "title": "my-title",
        "description": "my-description",
        "price": 50,
        "stock": 150,
        "itemType": "SELLER",
        "leader": true,
        "leaderLevel": "PLATINUM",
        "photos": ["url1", "url2"]
    })
}

#[rstest]
#[actix_web::test]
async fn created_item_can_be_fetched_by_location() {
    let app = app!();

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(item_body())
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned();
    let created_body: Value = test::read_body_json(created).await;
    assert_eq!(created_body["status"], "ACTIVE");
    assert_eq!(created_body["leaderLevel"], "PLATINUM");
    assert_eq!(created_body["createdAt"], created_body["updatedAt"]);

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&location).to_request(),
    )
    .await;
    assert_eq!(fetched, created_body);
}

#[rstest]
#[actix_web::test]
async fn duplicate_code_conflicts() {
    let app = app!();
    let request = || {
        test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(item_body())
            .to_request()
    };

    let first = test::call_service(&app, request()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = test::call_service(&app, request()).await;

    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert!(second.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "the item code must be unique");
}

#[rstest]
#[case(json!({"photos": []}), "photos")]
#[case(json!({"leaderLevel": "DIAMOND"}), "leaderLevel")]
#[case(json!({"itemType": "BROKER"}), "itemType")]
#[case(json!({"code": "   "}), "code")]
#[actix_web::test]
async fn invalid_items_are_rejected(#[case] overrides: Value, #[case] field: &str) {
    let app = app!();
    let mut body = item_body();
    if let (Some(target), Some(patch)) = (body.as_object_mut(), overrides.as_object()) {
        target.extend(patch.clone());
    }

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = test::read_body_json(response).await;
    assert_eq!(payload["code"], "invalid_request");
    assert_eq!(payload["details"]["field"], field);
}

#[rstest]
#[case("/api/v1/items/999999", StatusCode::NOT_FOUND)]
#[case("/api/v1/items/0", StatusCode::BAD_REQUEST)]
#[case("/api/v1/items/abc", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn lookups_by_bad_or_unknown_id_fail(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = app!();

    let response =
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn register_login_and_fetch_current_user() {
    let app = app!();

    let registered = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "Ada@Example.com",
                "password": "correct horse",
                "passwordConfirm": "correct horse"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let user: Value = test::read_body_json(registered).await;
    assert_eq!(user["email"], "ada@example.com");

    let token: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({"email": "ada@example.com", "password": "correct horse"}))
            .to_request(),
    )
    .await;
    assert_eq!(token["tokenType"], "Bearer");
    assert_eq!(token["expiresIn"], 300);
    let access = token["accessToken"].as_str().expect("token string");

    let me: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {access}")))
            .to_request(),
    )
    .await;
    assert_eq!(me, user);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_and_missing_token_are_unauthorised() {
    let app = app!();
    let register = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({
                "email": "ada@example.com",
                "password": "correct horse",
                "passwordConfirm": "correct horse"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(register.status(), StatusCode::CREATED);

    let login = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({"email": "ada@example.com", "password": "battery staple"}))
            .to_request(),
    )
    .await;
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);

    let me = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/users/me").to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}
