//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{festivals, hero_banners, products};

// ---------------------------------------------------------------------------
// Product models
// ---------------------------------------------------------------------------

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: String,
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price_minor_units: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price_minor_units: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for editor-facing product details. Never touches `slug`.
///
/// `treat_none_as_null` lets a cleared description reach the database.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductDetailsUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_minor_units: i64,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Storefront content models
// ---------------------------------------------------------------------------

/// Row struct for reading from the festivals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = festivals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FestivalRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub banner_image_url: Option<String>,
}

/// Row struct for reading from the hero_banners table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hero_banners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HeroBannerRow {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: i32,
    pub active: bool,
}
