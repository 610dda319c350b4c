//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (products,
//!   storefront, admin, health)
//! - **Schemas**: request/response DTOs plus domain type wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated document is served by Swagger UI in debug builds.

use crate::inbound::http::products::{
    BackfillEntryResponse, BackfillResponse, CreateProductBody, ProductListResponse,
    ProductResponse, UpdateProductBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::storefront::{
    FestivalResponse, HeroBannerResponse, StorefrontHomeResponse,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront backend API",
        description = "Product catalogue, storefront home content, and catalogue administration.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::backfill_slugs,
        crate::inbound::http::storefront::get_home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProductResponse,
        ProductListResponse,
        CreateProductBody,
        UpdateProductBody,
        BackfillEntryResponse,
        BackfillResponse,
        FestivalResponse,
        HeroBannerResponse,
        StorefrontHomeResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "products", description = "Public product catalogue"),
        (name = "storefront", description = "Storefront home page content"),
        (name = "admin", description = "Catalogue administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
