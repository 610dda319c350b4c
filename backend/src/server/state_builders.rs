//! Builders for HTTP state backed by PostgreSQL or fixtures.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use storefront::domain::{ProductCatalogueService, StorefrontHomeService};
use storefront::inbound::http::state::HttpState;
use storefront::outbound::persistence::{
    DbPool, DieselProductRepository, DieselStorefrontContentRepository,
};

use super::ServerConfig;

fn build_db_state(pool: &DbPool) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let catalogue = Arc::new(ProductCatalogueService::new(
        Arc::new(DieselProductRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let storefront = Arc::new(StorefrontHomeService::new(
        Arc::new(DieselStorefrontContentRepository::new(pool.clone())),
        clock,
    ));
    HttpState::new(catalogue.clone(), catalogue, storefront)
}

/// Build handler state, using real services when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_db_state(pool),
        None => {
            info!("no database configured; serving fixtures");
            HttpState::fixtures()
        }
    };
    web::Data::new(state)
}
