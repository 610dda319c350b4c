//! Driven ports for product persistence.
//!
//! Slug lookups are a separate, narrow port so the slug resolver can be
//! exercised against any store that can answer "is this slug taken by
//! another product?" without pulling in the full repository surface.

use async_trait::async_trait;

use crate::domain::{Product, ProductId, Slug};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product persistence adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "product repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "product repository query failed: {message}",
        /// Another product already owns the slug.
        DuplicateSlug { slug: String } =>
            "slug is already assigned to another product: {slug}",
        /// No product exists with the identifier.
        NotFound { id: String } =>
            "product not found: {id}",
    }
}

/// Port answering slug ownership questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductSlugLookup: Send + Sync {
    /// Return `true` when a product other than `exclude_id` owns `slug`.
    async fn exists_with_slug_excluding_id(
        &self,
        slug: &Slug,
        exclude_id: &ProductId,
    ) -> Result<bool, ProductRepositoryError>;
}

/// Port for reading and writing product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product.
    ///
    /// Fails with [`ProductRepositoryError::DuplicateSlug`] when the slug is
    /// already taken.
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// Persist name, description, price, and `updated_at`. The stored slug
    /// is not modified.
    async fn update_details(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// Attach `slug` to the product identified by `id`.
    async fn assign_slug(&self, id: &ProductId, slug: &Slug)
    -> Result<(), ProductRepositoryError>;

    /// Fetch a product by identifier.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError>;

    /// Fetch a product by slug.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, ProductRepositoryError>;

    /// All products ordered by creation time, then identifier.
    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;

    /// Products without a slug, in the same order as [`Self::list`].
    async fn list_missing_slug(&self) -> Result<Vec<Product>, ProductRepositoryError>;
}

#[cfg(test)]
mockall::mock! {
    /// Product store mock implementing both product ports, as the Diesel
    /// adapter does.
    pub ProductStore {}

    #[async_trait]
    impl ProductRepository for ProductStore {
        async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError>;
        async fn update_details(&self, product: &Product) -> Result<(), ProductRepositoryError>;
        async fn assign_slug(
            &self,
            id: &ProductId,
            slug: &Slug,
        ) -> Result<(), ProductRepositoryError>;
        async fn find_by_id(
            &self,
            id: &ProductId,
        ) -> Result<Option<Product>, ProductRepositoryError>;
        async fn find_by_slug(
            &self,
            slug: &Slug,
        ) -> Result<Option<Product>, ProductRepositoryError>;
        async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError>;
        async fn list_missing_slug(&self) -> Result<Vec<Product>, ProductRepositoryError>;
    }

    #[async_trait]
    impl ProductSlugLookup for ProductStore {
        async fn exists_with_slug_excluding_id(
            &self,
            slug: &Slug,
            exclude_id: &ProductId,
        ) -> Result<bool, ProductRepositoryError>;
    }
}
