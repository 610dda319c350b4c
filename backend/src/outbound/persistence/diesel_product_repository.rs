//! PostgreSQL-backed product repository.
//!
//! Implements both product ports. Slug uniqueness is ultimately enforced by
//! the `products_slug_key` index; violations surface as
//! [`ProductRepositoryError::DuplicateSlug`] so the catalogue service can
//! re-resolve.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductRepository, ProductRepositoryError, ProductSlugLookup};
use crate::domain::{Product, ProductDraft, ProductId, ProductName, Slug};

use super::diesel_helpers::{
    collect_rows, is_closed_connection, is_unique_violation_on, map_diesel_error_message,
    map_pool_error_message,
};
use super::models::{NewProductRow, ProductDetailsUpdate, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Unique index guarding `products.slug`.
pub const PRODUCTS_SLUG_CONSTRAINT: &str = "products_slug_key";

/// Diesel-backed implementation of the product ports.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/storefront")).await?;
    /// let repo = DieselProductRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    ProductRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error, operation: &str) -> ProductRepositoryError {
    let message = map_diesel_error_message(error, operation);
    if is_closed_connection(error) {
        ProductRepositoryError::connection(message)
    } else {
        ProductRepositoryError::query(message)
    }
}

/// Map a write failure, recognising slug collisions.
fn map_write_error(
    error: &diesel::result::Error,
    slug: Option<&Slug>,
    operation: &str,
) -> ProductRepositoryError {
    match slug {
        Some(slug) if is_unique_violation_on(error, PRODUCTS_SLUG_CONSTRAINT) => {
            ProductRepositoryError::duplicate_slug(slug.as_str())
        }
        _ => map_diesel_error(error, operation),
    }
}

fn row_to_product(row: ProductRow) -> Result<Product, String> {
    let id = ProductId::new(row.id).map_err(|e| e.to_string())?;
    let name = ProductName::new(row.name).map_err(|e| e.to_string())?;
    let slug = row
        .slug
        .map(Slug::new)
        .transpose()
        .map_err(|e| format!("product {id}: {e}"))?;
    Product::new(ProductDraft {
        id,
        name,
        slug,
        description: row.description,
        price_minor_units: row.price_minor_units,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|e| e.to_string())
}

fn rows_to_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, ProductRepositoryError> {
    collect_rows(
        rows.into_iter().map(row_to_product),
        ProductRepositoryError::query,
    )
}

#[async_trait]
impl ProductSlugLookup for DieselProductRepository {
    async fn exists_with_slug_excluding_id(
        &self,
        slug: &Slug,
        exclude_id: &ProductId,
    ) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            products::table
                .filter(products::slug.eq(slug.as_str()))
                .filter(products::id.ne(exclude_id.as_str())),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(&err, "slug lookup"))
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewProductRow {
            id: product.id().as_str(),
            name: product.name().as_str(),
            slug: product.slug().map(Slug::as_str),
            description: product.description(),
            price_minor_units: product.price_minor_units(),
            created_at: product.created_at(),
            updated_at: product.updated_at(),
        };
        diesel::insert_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(&err, product.slug(), "insert product"))
    }

    async fn update_details(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ProductDetailsUpdate {
            name: product.name().as_str(),
            description: product.description(),
            price_minor_units: product.price_minor_units(),
            updated_at: product.updated_at(),
        };
        let updated = diesel::update(products::table.find(product.id().as_str()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "update product"))?;
        if updated == 0 {
            return Err(ProductRepositoryError::not_found(product.id().as_str()));
        }
        Ok(())
    }

    async fn assign_slug(&self, id: &ProductId, slug: &Slug) -> Result<(), ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(products::table.find(id.as_str()))
            .set(products::slug.eq(slug.as_str()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(&err, Some(slug), "assign slug"))?;
        if updated == 0 {
            return Err(ProductRepositoryError::not_found(id.as_str()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = products::table
            .find(id.as_str())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find product by id"))?;
        row.map(row_to_product)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProductRow> = products::table
            .filter(products::slug.eq(slug.as_str()))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(&err, "find product by slug"))?;
        row.map(row_to_product)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .select(ProductRow::as_select())
            .order_by((products::created_at, products::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list products"))?;
        rows_to_products(rows)
    }

    async fn list_missing_slug(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProductRow> = products::table
            .filter(products::slug.is_null())
            .select(ProductRow::as_select())
            .order_by((products::created_at, products::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err, "list products missing slug"))?;
        rows_to_products(rows)
    }
}
