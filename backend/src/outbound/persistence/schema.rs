//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Catalogue products.
    ///
    /// `slug` is nullable for rows created before slugs existed and is
    /// unique across non-null values (`products_slug_key`).
    products (id) {
        /// Primary key: opaque slug-shaped identifier.
        id -> Varchar,
        /// Editor-facing display name (max 200 characters).
        name -> Varchar,
        /// Storefront URL slug.
        slug -> Nullable<Text>,
        description -> Nullable<Text>,
        /// Price in the currency's minor units.
        price_minor_units -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Time-boxed storefront promotions.
    festivals (id) {
        id -> Uuid,
        slug -> Text,
        title -> Text,
        description -> Nullable<Text>,
        starts_at -> Timestamptz,
        ends_at -> Timestamptz,
        banner_image_url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Home page carousel slides.
    hero_banners (id) {
        id -> Uuid,
        title -> Text,
        subtitle -> Nullable<Text>,
        image_url -> Text,
        link_url -> Nullable<Text>,
        position -> Int4,
        active -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(products, festivals, hero_banners);
