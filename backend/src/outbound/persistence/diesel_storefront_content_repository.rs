//! PostgreSQL-backed storefront content read adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StorefrontContentRepository, StorefrontContentRepositoryError};
use crate::domain::{Festival, FestivalDraft, HeroBanner, HeroBannerDraft, Slug};

use super::diesel_helpers::{
    collect_rows, is_closed_connection, map_diesel_error_message, map_pool_error_message,
};
use super::models::{FestivalRow, HeroBannerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{festivals, hero_banners};

/// Diesel-backed implementation of the storefront content port.
#[derive(Clone)]
pub struct DieselStorefrontContentRepository {
    pool: DbPool,
}

impl DieselStorefrontContentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StorefrontContentRepositoryError {
    StorefrontContentRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(error: &diesel::result::Error) -> StorefrontContentRepositoryError {
    let message = map_diesel_error_message(error, "storefront content read");
    if is_closed_connection(error) {
        StorefrontContentRepositoryError::connection(message)
    } else {
        StorefrontContentRepositoryError::query(message)
    }
}

fn row_to_festival(row: FestivalRow) -> Result<Festival, String> {
    let slug = Slug::new(row.slug).map_err(|e| format!("festival {}: {e}", row.id))?;
    Festival::new(FestivalDraft {
        id: row.id,
        slug,
        title: row.title,
        description: row.description,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        banner_image_url: row.banner_image_url,
    })
    .map_err(|e| e.to_string())
}

fn row_to_hero_banner(row: HeroBannerRow) -> Result<HeroBanner, String> {
    HeroBanner::new(HeroBannerDraft {
        id: row.id,
        title: row.title,
        subtitle: row.subtitle,
        image_url: row.image_url,
        link_url: row.link_url,
        position: row.position,
        active: row.active,
    })
    .map_err(|e| e.to_string())
}

#[async_trait]
impl StorefrontContentRepository for DieselStorefrontContentRepository {
    async fn festivals_running_at(
        &self,
        at: DateTime<Utc>,
    ) -> Result<Vec<Festival>, StorefrontContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FestivalRow> = festivals::table
            .filter(festivals::starts_at.le(at))
            .filter(festivals::ends_at.gt(at))
            .select(FestivalRow::as_select())
            .order_by((festivals::starts_at, festivals::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;
        collect_rows(
            rows.into_iter().map(row_to_festival),
            StorefrontContentRepositoryError::query,
        )
    }

    async fn active_hero_banners(
        &self,
    ) -> Result<Vec<HeroBanner>, StorefrontContentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<HeroBannerRow> = hero_banners::table
            .filter(hero_banners::active.eq(true))
            .select(HeroBannerRow::as_select())
            .order_by((hero_banners::position, hero_banners::id))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(&err))?;
        collect_rows(
            rows.into_iter().map(row_to_hero_banner),
            StorefrontContentRepositoryError::query,
        )
    }
}
