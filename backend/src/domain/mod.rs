//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed catalogue entities and the services that
//! operate on them, independent of HTTP and persistence. Adapters talk to the
//! domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - Slug (alias to `slug::Slug`) and `normalize_slug`: URL slug rules.
//! - Product (alias to `product::Product`): catalogue product.
//! - Festival and HeroBanner: storefront merchandising content.
//! - `resolve_slug`: collision-free slug assignment.
//! - ProductCatalogueService, SlugBackfillService, StorefrontHomeService.

pub mod error;
pub mod ports;
pub mod product;
pub mod product_catalogue_service;
pub mod slug;
pub mod slug_backfill;
pub mod slug_resolver;
pub mod storefront;
pub mod storefront_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::product::{
    PRODUCT_DESCRIPTION_MAX, PRODUCT_ID_MAX, PRODUCT_NAME_MAX, Product, ProductChanges,
    ProductDraft, ProductId, ProductName, ProductValidationError, validate_description,
};
pub use self::product_catalogue_service::{MAX_SLUG_ATTEMPTS, ProductCatalogueService};
pub use self::slug::{
    FALLBACK_SLUG_LEN, SLUG_SCRIPT_RANGES, Slug, SlugValidationError, is_slug_char,
    is_valid_slug, normalize_slug,
};
pub use self::slug_backfill::{BackfillEntry, BackfillMode, BackfillReport, SlugBackfillService};
pub use self::slug_resolver::resolve_slug;
pub use self::storefront::{
    Festival, FestivalDraft, HeroBanner, HeroBannerDraft, StorefrontValidationError,
};
pub use self::storefront_service::StorefrontHomeService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use storefront::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("no such product"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
