//! Driven port for storefront merchandising content.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Festival, HeroBanner};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading storefront content.
    pub enum StorefrontContentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "storefront content connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "storefront content query failed: {message}",
    }
}

/// Port for reading festivals and hero banners.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontContentRepository: Send + Sync {
    /// Festivals running at `at`, ordered by start time.
    async fn festivals_running_at(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<Festival>, StorefrontContentRepositoryError>;

    /// Active hero banners ordered by position.
    async fn active_hero_banners(&self)
    -> Result<Vec<HeroBanner>, StorefrontContentRepositoryError>;
}

/// Fixture implementation for deployments without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStorefrontContentRepository;

#[async_trait]
impl StorefrontContentRepository for FixtureStorefrontContentRepository {
    async fn festivals_running_at(
        &self,
        _at: DateTime<Utc>,
    ) -> Result<Vec<Festival>, StorefrontContentRepositoryError> {
        Ok(Vec::new())
    }

    async fn active_hero_banners(
        &self,
    ) -> Result<Vec<HeroBanner>, StorefrontContentRepositoryError> {
        Ok(Vec::new())
    }
}
