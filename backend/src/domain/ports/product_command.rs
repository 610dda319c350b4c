//! Driving port for catalogue writes issued from the admin panel.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    BackfillReport, Error, Product, ProductChanges, ProductDraft, ProductId, ProductName, Slug,
    normalize_slug,
};

/// Request to create a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductRequest {
    pub name: ProductName,
    pub description: Option<String>,
    pub price_minor_units: i64,
}

/// Request to edit an existing product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProductRequest {
    pub id: ProductId,
    pub changes: ProductChanges,
}

/// Port for catalogue mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// Create a product and assign it a unique slug.
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error>;

    /// Apply editor changes. Slugs are stable and never recomputed here.
    async fn update_product(&self, request: UpdateProductRequest) -> Result<Product, Error>;

    /// Assign slugs to every product that lacks one.
    async fn backfill_slugs(&self) -> Result<BackfillReport, Error>;
}

/// Fixture implementation used when no database is configured.
///
/// Created products are not stored; their slug is the normalised name
/// without any uniqueness check.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCommand;

#[async_trait]
impl ProductCommand for FixtureProductCommand {
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error> {
        let id = ProductId::random();
        let slug = Slug::new(normalize_slug(request.name.as_str()))
            .unwrap_or_else(|_| id.fallback_slug());
        let now = Utc::now();
        Product::new(ProductDraft {
            id,
            name: request.name,
            slug: Some(slug),
            description: request.description,
            price_minor_units: request.price_minor_units,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn update_product(&self, request: UpdateProductRequest) -> Result<Product, Error> {
        Err(Error::not_found(format!("product not found: {}", request.id)))
    }

    async fn backfill_slugs(&self) -> Result<BackfillReport, Error> {
        Ok(BackfillReport::default())
    }
}
