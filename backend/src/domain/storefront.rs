//! Storefront merchandising read models: festivals and hero banners.
//!
//! Festivals are time-boxed promotions surfaced on the storefront home page
//! while they are running. Hero banners are the ordered carousel at the top
//! of the home page.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::Slug;

/// Validation errors raised by storefront read models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontValidationError {
    EmptyField { field: &'static str },
    InvalidWindow { field: &'static str },
    NegativeValue { field: &'static str, value: i32 },
}

impl fmt::Display for StorefrontValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidWindow { field } => write!(f, "{field} must end after it starts"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
        }
    }
}

impl std::error::Error for StorefrontValidationError {}

fn non_empty(value: String, field: &'static str) -> Result<String, StorefrontValidationError> {
    if value.trim().is_empty() {
        return Err(StorefrontValidationError::EmptyField { field });
    }
    Ok(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Input payload for [`Festival::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestivalDraft {
    pub id: Uuid,
    pub slug: Slug,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub banner_image_url: Option<String>,
}

/// Time-boxed promotion shown while running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Festival {
    pub id: Uuid,
    pub slug: Slug,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image_url: Option<String>,
}

impl Festival {
    /// Validate and construct a festival.
    pub fn new(draft: FestivalDraft) -> Result<Self, StorefrontValidationError> {
        let title = non_empty(draft.title, "festival.title")?;
        if draft.ends_at <= draft.starts_at {
            return Err(StorefrontValidationError::InvalidWindow {
                field: "festival.ends_at",
            });
        }
        Ok(Self {
            id: draft.id,
            slug: draft.slug,
            title,
            description: non_blank(draft.description),
            starts_at: draft.starts_at,
            ends_at: draft.ends_at,
            banner_image_url: non_blank(draft.banner_image_url),
        })
    }

    /// Whether the festival is running at `at` (`starts_at <= at < ends_at`).
    pub fn is_running_at(&self, at: DateTime<Utc>) -> bool {
        self.starts_at <= at && at < self.ends_at
    }
}

/// Input payload for [`HeroBanner::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroBannerDraft {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub active: bool,
}

/// Home page carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBanner {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    pub position: i32,
    pub active: bool,
}

impl HeroBanner {
    /// Validate and construct a hero banner.
    pub fn new(draft: HeroBannerDraft) -> Result<Self, StorefrontValidationError> {
        let title = non_empty(draft.title, "hero_banner.title")?;
        let image_url = non_empty(draft.image_url, "hero_banner.image_url")?;
        if draft.position < 0 {
            return Err(StorefrontValidationError::NegativeValue {
                field: "hero_banner.position",
                value: draft.position,
            });
        }
        Ok(Self {
            id: draft.id,
            title,
            subtitle: non_blank(draft.subtitle),
            image_url,
            link_url: non_blank(draft.link_url),
            position: draft.position,
            active: draft.active,
        })
    }
}
