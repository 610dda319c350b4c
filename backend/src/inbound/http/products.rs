//! Product catalogue endpoints.
//!
//! ```text
//! GET   /api/v1/products
//! GET   /api/v1/products/{slug}
//! POST  /api/v1/admin/products
//! PATCH /api/v1/admin/products/{id}
//! POST  /api/v1/admin/products/slugs/backfill
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use utoipa::ToSchema;

use crate::domain::ports::{CreateProductRequest, UpdateProductRequest};
use crate::domain::{
    BackfillEntry, BackfillReport, Error, Product, ProductChanges, ProductId, ProductName, Slug,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Product as returned to storefront and admin clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Rose Oil")]
    pub name: String,
    /// Absent only for products awaiting the slug backfill.
    #[schema(example = "rose-oil")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[schema(example = 1250)]
    pub price_minor_units: i64,
    #[schema(example = "2026-03-01T10:00:00Z")]
    pub created_at: String,
    #[schema(example = "2026-03-01T10:00:00Z")]
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            slug: product.slug().map(ToString::to_string),
            description: product.description().map(str::to_owned),
            price_minor_units: product.price_minor_units(),
            created_at: product.created_at().to_rfc3339(),
            updated_at: product.updated_at().to_rfc3339(),
        }
    }
}

/// Product listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

/// Request body for creating a product. The slug is derived from `name`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateProductBody {
    #[schema(example = "Rose Oil")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[schema(example = 1250)]
    pub price_minor_units: i64,
}

/// Request body for editing a product. Omitted fields are left unchanged;
/// an empty `description` clears it. The slug never changes.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProductBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_minor_units: Option<i64>,
}

/// One product that received a slug during a backfill.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BackfillEntryResponse {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<BackfillEntry> for BackfillEntryResponse {
    fn from(entry: BackfillEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            name: entry.name.to_string(),
            slug: entry.slug.to_string(),
        }
    }
}

/// Outcome of a slug backfill.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BackfillResponse {
    /// Number of products that received a slug.
    pub assigned: usize,
    pub entries: Vec<BackfillEntryResponse>,
}

impl From<BackfillReport> for BackfillResponse {
    fn from(report: BackfillReport) -> Self {
        Self {
            assigned: report.len(),
            entries: report.entries.into_iter().map(Into::into).collect(),
        }
    }
}

const PRODUCTS_BASE: &str = "http://storefront.invalid/api/v1/products";

/// Path of the public product resource, with the slug percent-encoded as a
/// single segment.
fn product_location(slug: &str) -> Option<String> {
    let mut url = Url::parse(PRODUCTS_BASE).ok()?;
    url.path_segments_mut().ok()?.push(slug);
    Some(url.path().to_owned())
}

fn parse_name(name: String) -> Result<ProductName, Error> {
    ProductName::new(name).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "name" }))
    })
}

impl TryFrom<CreateProductBody> for CreateProductRequest {
    type Error = Error;

    fn try_from(body: CreateProductBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: parse_name(body.name)?,
            description: body.description,
            price_minor_units: body.price_minor_units,
        })
    }
}

impl TryFrom<UpdateProductBody> for ProductChanges {
    type Error = Error;

    fn try_from(body: UpdateProductBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body.name.map(parse_name).transpose()?,
            description: body.description,
            price_minor_units: body.price_minor_units,
        })
    }
}

/// List every product.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products in catalogue order", body = ProductListResponse),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let products = state.products.list_products().await?;
    Ok(HttpResponse::Ok().json(ProductListResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

/// Fetch the product published under a slug.
#[utoipa::path(
    get,
    path = "/api/v1/products/{slug}",
    params(("slug" = String, Path, description = "Product slug", example = "rose-oil")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "No product has this slug", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProductBySlug"
)]
#[get("/products/{slug}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    // A malformed slug cannot belong to any product.
    let slug =
        Slug::new(raw.as_str()).map_err(|_| Error::not_found(format!("product not found: {raw}")))?;
    let product = state.products.get_product_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Create a product and assign it a unique slug.
#[utoipa::path(
    post,
    path = "/api/v1/admin/products",
    request_body = CreateProductBody,
    responses(
        (
            status = 201,
            description = "Product created",
            headers(("Location" = String, description = "Storefront URL of the product")),
            body = ProductResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Slug could not be allocated", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createProduct"
)]
#[post("/admin/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let request = CreateProductRequest::try_from(payload.into_inner())?;
    let product = state.product_admin.create_product(request).await?;
    let response = ProductResponse::from(product);
    let mut builder = HttpResponse::Created();
    if let Some(location) = response.slug.as_deref().and_then(product_location) {
        builder.insert_header((header::LOCATION, location));
    }
    Ok(builder.json(response))
}

/// Edit a product's name, description, or price. The slug is kept.
#[utoipa::path(
    patch,
    path = "/api/v1/admin/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown product", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateProduct"
)]
#[patch("/admin/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateProductBody>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id = ProductId::new(raw.as_str())
        .map_err(|_| Error::not_found(format!("product not found: {raw}")))?;
    let changes = ProductChanges::try_from(payload.into_inner())?;
    let product = state
        .product_admin
        .update_product(UpdateProductRequest { id, changes })
        .await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Assign slugs to every product that lacks one.
#[utoipa::path(
    post,
    path = "/api/v1/admin/products/slugs/backfill",
    responses(
        (status = 200, description = "Backfill report", body = BackfillResponse),
        (status = 409, description = "Slug collision during backfill", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "backfillProductSlugs"
)]
#[post("/admin/products/slugs/backfill")]
pub async fn backfill_slugs(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let report = state.product_admin.backfill_slugs().await?;
    Ok(HttpResponse::Ok().json(BackfillResponse::from(report)))
}
