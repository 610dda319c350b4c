//! Storefront home page service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::Error;
use super::ports::{
    StorefrontContentRepository, StorefrontContentRepositoryError, StorefrontHomeSnapshot,
    StorefrontQuery,
};

/// Assembles the home page from hero banners and running festivals.
#[derive(Clone)]
pub struct StorefrontHomeService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> StorefrontHomeService<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_content_error(error: StorefrontContentRepositoryError) -> Error {
    match error {
        StorefrontContentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("storefront content unavailable: {message}"))
        }
        StorefrontContentRepositoryError::Query { message } => {
            Error::internal(format!("storefront content error: {message}"))
        }
    }
}

#[async_trait]
impl<R> StorefrontQuery for StorefrontHomeService<R>
where
    R: StorefrontContentRepository,
{
    async fn home_snapshot(&self) -> Result<StorefrontHomeSnapshot, Error> {
        let generated_at = self.clock.utc();
        let hero_banners = self
            .repo
            .active_hero_banners()
            .await
            .map_err(map_content_error)?;
        let festivals = self
            .repo
            .festivals_running_at(generated_at)
            .await
            .map_err(map_content_error)?;
        Ok(StorefrontHomeSnapshot {
            generated_at,
            hero_banners,
            festivals,
        })
    }
}
