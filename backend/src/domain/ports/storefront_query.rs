//! Driving port for the storefront home page.
//!
//! The snapshot is assembled in one port call so the home page renders a
//! consistent view of banners and running promotions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Festival, HeroBanner};

/// Content shown on the storefront home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontHomeSnapshot {
    pub generated_at: DateTime<Utc>,
    pub hero_banners: Vec<HeroBanner>,
    pub festivals: Vec<Festival>,
}

impl StorefrontHomeSnapshot {
    /// Snapshot with no content, stamped with the current time.
    pub fn empty() -> Self {
        Self {
            generated_at: Utc::now(),
            hero_banners: Vec::new(),
            festivals: Vec::new(),
        }
    }
}

/// Port for reading the storefront home page content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorefrontQuery: Send + Sync {
    /// Active hero banners and the festivals running now.
    async fn home_snapshot(&self) -> Result<StorefrontHomeSnapshot, Error>;
}

/// Fixture implementation serving an empty home page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStorefrontQuery;

#[async_trait]
impl StorefrontQuery for FixtureStorefrontQuery {
    async fn home_snapshot(&self) -> Result<StorefrontHomeSnapshot, Error> {
        Ok(StorefrontHomeSnapshot::empty())
    }
}
