//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod products;
pub mod schemas;
pub mod state;
pub mod storefront;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the `/api/v1` endpoints on `cfg`.
///
/// Callers attach an [`state::HttpState`] as app data; malformed JSON bodies
/// are rendered as `invalid_request` errors.
///
/// # Examples
///
/// ```no_run
/// use actix_web::{App, web};
/// use storefront::inbound::http::{configure_api, state::HttpState};
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::fixtures()))
///     .service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(products::list_products)
        .service(products::get_product)
        .service(products::backfill_slugs)
        .service(products::create_product)
        .service(products::update_product)
        .service(storefront::get_home);
}
