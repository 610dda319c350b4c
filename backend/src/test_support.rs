//! Test utilities for the storefront crate.
//!
//! In-memory implementations of the driven ports, shared by unit tests (in
//! `src/`) and integration tests (in `tests/`). Only compiled for tests or
//! with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{
    ProductRepository, ProductRepositoryError, ProductSlugLookup, StorefrontContentRepository,
    StorefrontContentRepositoryError,
};
use crate::domain::{Festival, HeroBanner, Product, ProductDraft, ProductId, Slug};

/// Product store enforcing slug uniqueness like the database index does.
///
/// # Examples
///
/// ```rust
/// use storefront::domain::ports::ProductSlugLookup;
/// use storefront::domain::{ProductId, Slug};
/// use storefront::test_support::InMemoryProductRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = InMemoryProductRepository::default();
/// let taken = repo
///     .exists_with_slug_excluding_id(&Slug::new("rose-oil")?, &ProductId::new("p1")?)
///     .await?;
/// assert!(!taken);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    /// Seed the store with `products`, kept in insertion order.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: Mutex::new(products.into_iter().collect()),
        }
    }

    /// Copy of every stored product.
    pub fn snapshot(&self) -> Vec<Product> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
        self.products
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn ordered(products: &[Product]) -> Vec<Product> {
        let mut ordered = products.to_vec();
        ordered.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });
        ordered
    }

    fn slug_owned_by_other(products: &[Product], slug: &Slug, id: &ProductId) -> bool {
        products
            .iter()
            .any(|product| product.id() != id && product.slug() == Some(slug))
    }
}

#[async_trait]
impl ProductSlugLookup for InMemoryProductRepository {
    async fn exists_with_slug_excluding_id(
        &self,
        slug: &Slug,
        exclude_id: &ProductId,
    ) -> Result<bool, ProductRepositoryError> {
        Ok(Self::slug_owned_by_other(&self.lock(), slug, exclude_id))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let mut products = self.lock();
        if products.iter().any(|existing| existing.id() == product.id()) {
            return Err(ProductRepositoryError::query(format!(
                "duplicate product id: {}",
                product.id()
            )));
        }
        if let Some(slug) = product.slug() {
            if Self::slug_owned_by_other(&products, slug, product.id()) {
                return Err(ProductRepositoryError::duplicate_slug(slug.as_str()));
            }
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update_details(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let mut products = self.lock();
        let Some(stored) = products
            .iter_mut()
            .find(|existing| existing.id() == product.id())
        else {
            return Err(ProductRepositoryError::not_found(product.id().as_str()));
        };
        // Keep the stored slug; only the editable details change.
        let updated = Product::new(ProductDraft {
            id: product.id().clone(),
            name: product.name().clone(),
            slug: stored.slug().cloned(),
            description: product.description().map(str::to_owned),
            price_minor_units: product.price_minor_units(),
            created_at: stored.created_at(),
            updated_at: product.updated_at(),
        })
        .map_err(|err| ProductRepositoryError::query(err.to_string()))?;
        *stored = updated;
        Ok(())
    }

    async fn assign_slug(&self, id: &ProductId, slug: &Slug) -> Result<(), ProductRepositoryError> {
        let mut products = self.lock();
        if Self::slug_owned_by_other(&products, slug, id) {
            return Err(ProductRepositoryError::duplicate_slug(slug.as_str()));
        }
        let Some(index) = products.iter().position(|existing| existing.id() == id) else {
            return Err(ProductRepositoryError::not_found(id.as_str()));
        };
        let product = products.remove(index);
        products.insert(index, product.with_slug(slug.clone()));
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.lock().iter().find(|p| p.id() == id).cloned())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.lock().iter().find(|p| p.slug() == Some(slug)).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(Self::ordered(&self.lock()))
    }

    async fn list_missing_slug(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        let products = self.lock();
        let missing: Vec<Product> = products
            .iter()
            .filter(|product| product.slug().is_none())
            .cloned()
            .collect();
        Ok(Self::ordered(&missing))
    }
}

/// Storefront content held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorefrontContentRepository {
    pub festivals: Vec<Festival>,
    pub hero_banners: Vec<HeroBanner>,
}

#[async_trait]
impl StorefrontContentRepository for InMemoryStorefrontContentRepository {
    async fn festivals_running_at(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<Festival>, StorefrontContentRepositoryError> {
        let mut running: Vec<Festival> = self
            .festivals
            .iter()
            .filter(|festival| festival.is_running_at(at))
            .cloned()
            .collect();
        running.sort_by_key(|festival| festival.starts_at);
        Ok(running)
    }

    async fn active_hero_banners(
        &self,
    ) -> Result<Vec<HeroBanner>, StorefrontContentRepositoryError> {
        let mut active: Vec<HeroBanner> = self
            .hero_banners
            .iter()
            .filter(|banner| banner.active)
            .cloned()
            .collect();
        active.sort_by_key(|banner| banner.position);
        Ok(active)
    }
}

/// Clock returning a settable instant.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
