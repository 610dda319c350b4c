//! Slug backfill for products created before slugs existed.
//!
//! Products are processed one after another so each resolution observes the
//! slugs assigned earlier in the same run. The run stops at the first
//! repository failure; slugs already written stay written.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{ProductRepository, ProductRepositoryError, ProductSlugLookup};
use super::slug_resolver::resolve_slug;
use super::{ProductId, ProductName, Slug};

/// Whether resolved slugs are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackfillMode {
    /// Resolve and write each slug.
    #[default]
    Apply,
    /// Resolve only. Later products still see the slugs planned for
    /// earlier ones.
    DryRun,
}

/// One product that received a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillEntry {
    pub id: ProductId,
    pub name: ProductName,
    pub slug: Slug,
}

/// Outcome of a backfill run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub entries: Vec<BackfillEntry>,
}

impl BackfillReport {
    /// Number of products that received a slug.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no product needed a slug.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assigns slugs to every product lacking one.
#[derive(Clone)]
pub struct SlugBackfillService<R> {
    repo: Arc<R>,
}

impl<R> SlugBackfillService<R> {
    /// Create a new service over the product repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> SlugBackfillService<R>
where
    R: ProductRepository + ProductSlugLookup,
{
    /// Resolve and persist slugs, calling `on_progress` after each product.
    ///
    /// # Errors
    ///
    /// Returns the first repository error unchanged.
    pub async fn run<F>(&self, on_progress: F) -> Result<BackfillReport, ProductRepositoryError>
    where
        F: FnMut(&BackfillEntry) + Send,
    {
        self.run_with_mode(BackfillMode::Apply, on_progress).await
    }

    /// Like [`Self::run`], honouring `mode`.
    ///
    /// # Errors
    ///
    /// Returns the first repository error unchanged.
    pub async fn run_with_mode<F>(
        &self,
        mode: BackfillMode,
        mut on_progress: F,
    ) -> Result<BackfillReport, ProductRepositoryError>
    where
        F: FnMut(&BackfillEntry) + Send,
    {
        let pending = self.repo.list_missing_slug().await?;
        info!(count = pending.len(), ?mode, "starting slug backfill");

        let mut lookup = PlannedSlugs::new(self.repo.as_ref());
        let mut report = BackfillReport::default();
        for product in pending {
            let slug = resolve_slug(product.name().as_str(), product.id(), &lookup).await?;
            if mode == BackfillMode::Apply {
                self.repo.assign_slug(product.id(), &slug).await?;
            }
            lookup.plan(slug.clone(), product.id().clone());

            let entry = BackfillEntry {
                id: product.id().clone(),
                name: product.name().clone(),
                slug,
            };
            on_progress(&entry);
            report.entries.push(entry);
        }

        info!(assigned = report.len(), ?mode, "slug backfill finished");
        Ok(report)
    }
}

/// Lookup overlaying the slugs chosen in this run on the store.
struct PlannedSlugs<'a, L: ?Sized> {
    store: &'a L,
    planned: HashMap<Slug, ProductId>,
}

impl<'a, L: ?Sized> PlannedSlugs<'a, L> {
    fn new(store: &'a L) -> Self {
        Self {
            store,
            planned: HashMap::new(),
        }
    }

    fn plan(&mut self, slug: Slug, owner: ProductId) {
        self.planned.insert(slug, owner);
    }
}

#[async_trait]
impl<L> ProductSlugLookup for PlannedSlugs<'_, L>
where
    L: ProductSlugLookup + ?Sized,
{
    async fn exists_with_slug_excluding_id(
        &self,
        slug: &Slug,
        exclude_id: &ProductId,
    ) -> Result<bool, ProductRepositoryError> {
        if self
            .planned
            .get(slug)
            .is_some_and(|owner| owner != exclude_id)
        {
            return Ok(true);
        }
        self.store
            .exists_with_slug_excluding_id(slug, exclude_id)
            .await
    }
}
