//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_command;
mod product_query;
mod product_repository;
mod storefront_content_repository;
mod storefront_query;

#[cfg(test)]
pub use product_command::MockProductCommand;
pub use product_command::{
    CreateProductRequest, FixtureProductCommand, ProductCommand, UpdateProductRequest,
};
#[cfg(test)]
pub use product_query::MockProductQuery;
pub use product_query::{FixtureProductQuery, ProductQuery};
#[cfg(test)]
pub use product_repository::{MockProductSlugLookup, MockProductStore};
pub use product_repository::{ProductRepository, ProductRepositoryError, ProductSlugLookup};
#[cfg(test)]
pub use storefront_content_repository::MockStorefrontContentRepository;
pub use storefront_content_repository::{
    FixtureStorefrontContentRepository, StorefrontContentRepository,
    StorefrontContentRepositoryError,
};
#[cfg(test)]
pub use storefront_query::MockStorefrontQuery;
pub use storefront_query::{FixtureStorefrontQuery, StorefrontHomeSnapshot, StorefrontQuery};
