//! Driving port for storefront product browsing.

use async_trait::async_trait;

use crate::domain::{Error, Product, Slug};

/// Port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// All products in catalogue order.
    async fn list_products(&self) -> Result<Vec<Product>, Error>;

    /// The product published under `slug`.
    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Product, Error>;
}

/// Fixture implementation serving an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductQuery;

#[async_trait]
impl ProductQuery for FixtureProductQuery {
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        Ok(Vec::new())
    }

    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Product, Error> {
        Err(Error::not_found(format!("product not found: {slug}")))
    }
}
