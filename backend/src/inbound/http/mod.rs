//! HTTP inbound adapter exposing the REST API.

pub mod auth;
pub mod error;
pub mod health;
pub mod items;
pub mod state;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api/v1` handlers and extractor settings on `cfg`.
///
/// Callers mount this under a scope and provide [`state::HttpState`] as app
/// data.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use marketplace::inbound::http::{configure_api, state::HttpState};
///
/// let _app = App::new()
///     .app_data(web::Data::new(HttpState::fixtures()))
///     .service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::path_config())
        .service(items::create_item)
        .service(items::get_item)
        .service(users::register)
        .service(users::login)
        .service(users::me);
}
