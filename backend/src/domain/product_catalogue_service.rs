//! Product catalogue domain service.
//!
//! Implements the catalogue driving ports over a store that provides both
//! [`ProductRepository`] and [`ProductSlugLookup`]. Slugs are resolved once at
//! creation; the database unique index arbitrates concurrent creators, and
//! the loser re-resolves against the now-visible winner.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use super::ports::{
    CreateProductRequest, ProductCommand, ProductQuery, ProductRepository,
    ProductRepositoryError, ProductSlugLookup, UpdateProductRequest,
};
use super::slug_backfill::{BackfillReport, SlugBackfillService};
use super::slug_resolver::resolve_slug;
use super::{Error, Product, ProductDraft, ProductId, ProductValidationError, Slug};

/// Number of times creation re-resolves a slug lost to a concurrent writer.
pub const MAX_SLUG_ATTEMPTS: u32 = 3;

/// Catalogue service implementing [`ProductCommand`] and [`ProductQuery`].
#[derive(Clone)]
pub struct ProductCatalogueService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProductCatalogueService<R> {
    /// Create a new service with the given store and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ProductCatalogueService<R>
where
    R: ProductRepository + ProductSlugLookup,
{
    fn map_repository_error(error: ProductRepositoryError) -> Error {
        match error {
            ProductRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("product repository unavailable: {message}"))
            }
            ProductRepositoryError::Query { message } => {
                Error::internal(format!("product repository error: {message}"))
            }
            ProductRepositoryError::DuplicateSlug { slug } => {
                Error::conflict(format!("slug is already in use: {slug}"))
                    .with_details(json!({ "slug": slug, "code": "duplicate_slug" }))
            }
            ProductRepositoryError::NotFound { id } => {
                Error::not_found(format!("product not found: {id}"))
            }
        }
    }

    fn map_validation_error(error: ProductValidationError) -> Error {
        Error::invalid_request(error.to_string())
    }

    fn not_found(id: &ProductId) -> Error {
        Error::not_found(format!("product not found: {id}"))
    }

    async fn insert_with_unique_slug(&self, product: Product) -> Result<Product, Error> {
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = resolve_slug(product.name().as_str(), product.id(), self.repo.as_ref())
                .await
                .map_err(Self::map_repository_error)?;
            let candidate = product.clone().with_slug(slug);
            match self.repo.insert(&candidate).await {
                Ok(()) => return Ok(candidate),
                Err(ProductRepositoryError::DuplicateSlug { slug }) => {
                    warn!(
                        product_id = %product.id(),
                        %slug,
                        attempt,
                        "slug claimed concurrently; re-resolving"
                    );
                }
                Err(err) => return Err(Self::map_repository_error(err)),
            }
        }
        Err(Error::conflict("could not allocate a unique slug").with_details(json!({
            "attempts": MAX_SLUG_ATTEMPTS,
            "code": "slug_exhausted",
        })))
    }
}

#[async_trait]
impl<R> ProductCommand for ProductCatalogueService<R>
where
    R: ProductRepository + ProductSlugLookup,
{
    async fn create_product(&self, request: CreateProductRequest) -> Result<Product, Error> {
        let now = self.clock.utc();
        let product = Product::new(ProductDraft {
            id: ProductId::random(),
            name: request.name,
            slug: None,
            description: request.description,
            price_minor_units: request.price_minor_units,
            created_at: now,
            updated_at: now,
        })
        .map_err(Self::map_validation_error)?;

        let created = self.insert_with_unique_slug(product).await?;
        info!(
            product_id = %created.id(),
            slug = created.slug().map(Slug::as_str),
            "product created"
        );
        Ok(created)
    }

    async fn update_product(&self, request: UpdateProductRequest) -> Result<Product, Error> {
        let UpdateProductRequest { id, changes } = request;
        let mut product = self
            .repo
            .find_by_id(&id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(&id))?;

        product
            .apply_changes(changes, self.clock.utc())
            .map_err(Self::map_validation_error)?;
        self.repo
            .update_details(&product)
            .await
            .map_err(Self::map_repository_error)?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    async fn backfill_slugs(&self) -> Result<BackfillReport, Error> {
        SlugBackfillService::new(Arc::clone(&self.repo))
            .run(|entry| {
                info!(product_id = %entry.id, slug = %entry.slug, "slug assigned");
            })
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R> ProductQuery for ProductCatalogueService<R>
where
    R: ProductRepository + ProductSlugLookup,
{
    async fn list_products(&self) -> Result<Vec<Product>, Error> {
        self.repo
            .list()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Product, Error> {
        self.repo
            .find_by_slug(slug)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product not found: {slug}")))
    }
}

#[cfg(test)]
#[path = "product_catalogue_service_tests.rs"]
mod tests;
