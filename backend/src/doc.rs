//! OpenAPI document for the marketplace API.
//!
//! [`ApiDoc`] collects every inbound HTTP path plus the request, response, and
//! error schemas they reference. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::items::{CreateItemRequest, ItemResponse};
use crate::inbound::http::users::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};

/// Registers the bearer scheme used by `GET /api/v1/users/me`.
struct BearerAddon;

impl Modify for BearerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Access token from POST /api/v1/users/login."))
            .build();
        components.add_security_scheme("BearerAuth", SecurityScheme::Http(scheme));
    }
}

/// OpenAPI description of every marketplace route.
#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAddon),
    info(
        title = "Marketplace API",
        description = "Item listings with photos, user accounts, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::get_item,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::me,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateItemRequest,
        ItemResponse,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        UserResponse,
        ProbeBody,
        Error,
        ErrorCode
    )),
    tags(
        (name = "items", description = "Create and fetch item listings"),
        (name = "users", description = "Registration, login, and identity"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
