//! Storefront home page endpoint.
//!
//! ```text
//! GET /api/v1/storefront/home
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::StorefrontHomeSnapshot;
use crate::domain::{Festival, HeroBanner};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Running promotion.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FestivalResponse {
    pub id: String,
    #[schema(example = "nowruz-sale")]
    pub slug: String,
    #[schema(example = "Nowruz Sale")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
}

impl From<Festival> for FestivalResponse {
    fn from(festival: Festival) -> Self {
        Self {
            id: festival.id.to_string(),
            slug: festival.slug.to_string(),
            title: festival.title,
            description: festival.description,
            starts_at: festival.starts_at.to_rfc3339(),
            ends_at: festival.ends_at.to_rfc3339(),
            banner_image_url: festival.banner_image_url,
        }
    }
}

/// Home page carousel slide.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeroBannerResponse {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub position: i32,
}

impl From<HeroBanner> for HeroBannerResponse {
    fn from(banner: HeroBanner) -> Self {
        Self {
            id: banner.id.to_string(),
            title: banner.title,
            subtitle: banner.subtitle,
            image_url: banner.image_url,
            link_url: banner.link_url,
            position: banner.position,
        }
    }
}

/// Response payload for the storefront home page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontHomeResponse {
    /// ISO 8601 timestamp when the snapshot was assembled.
    #[schema(example = "2026-03-25T12:00:00Z")]
    pub generated_at: String,
    pub hero_banners: Vec<HeroBannerResponse>,
    pub festivals: Vec<FestivalResponse>,
}

impl From<StorefrontHomeSnapshot> for StorefrontHomeResponse {
    fn from(snapshot: StorefrontHomeSnapshot) -> Self {
        Self {
            generated_at: snapshot.generated_at.to_rfc3339(),
            hero_banners: snapshot.hero_banners.into_iter().map(Into::into).collect(),
            festivals: snapshot.festivals.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fetch hero banners and running festivals.
#[utoipa::path(
    get,
    path = "/api/v1/storefront/home",
    responses(
        (status = 200, description = "Home page content", body = StorefrontHomeResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["storefront"],
    operation_id = "getStorefrontHome"
)]
#[get("/storefront/home")]
pub async fn get_home(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let snapshot = state.storefront.home_snapshot().await?;
    Ok(HttpResponse::Ok().json(StorefrontHomeResponse::from(snapshot)))
}
