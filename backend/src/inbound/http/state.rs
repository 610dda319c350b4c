//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureProductCommand, FixtureProductQuery, FixtureStorefrontQuery, ProductCommand,
    ProductQuery, StorefrontQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ProductQuery>,
    pub product_admin: Arc<dyn ProductCommand>,
    pub storefront: Arc<dyn StorefrontQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        products: Arc<dyn ProductQuery>,
        product_admin: Arc<dyn ProductCommand>,
        storefront: Arc<dyn StorefrontQuery>,
    ) -> Self {
        Self {
            products,
            product_admin,
            storefront,
        }
    }

    /// State backed entirely by fixtures, used when no database is configured.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureProductQuery),
            Arc::new(FixtureProductCommand),
            Arc::new(FixtureStorefrontQuery),
        )
    }
}
