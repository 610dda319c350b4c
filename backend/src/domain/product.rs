//! Product catalogue entities.
//!
//! Products are created by editors in the admin panel and browsed on the
//! storefront by slug. The slug is derived once from the display name and
//! stays stable across later renames.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::{FALLBACK_SLUG_LEN, Slug, is_valid_slug};

/// Maximum number of characters in a product identifier.
pub const PRODUCT_ID_MAX: usize = 64;
/// Maximum number of characters in a product display name.
pub const PRODUCT_NAME_MAX: usize = 200;
/// Maximum number of characters in a product description.
pub const PRODUCT_DESCRIPTION_MAX: usize = 2000;

/// Validation errors raised when constructing product values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    EmptyId,
    IdTooLong { max: usize },
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    DescriptionTooLong { max: usize },
    NegativePrice,
    UpdatedBeforeCreated,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "product id must not be empty"),
            Self::IdTooLong { max } => write!(f, "product id must be at most {max} characters"),
            Self::InvalidId => write!(
                f,
                "product id may only contain lowercase letters, digits, and single inner hyphens",
            ),
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "product name must be at most {max} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "product description must be at most {max} characters")
            }
            Self::NegativePrice => write!(f, "product price must not be negative"),
            Self::UpdatedBeforeCreated => {
                write!(f, "product updated_at must not precede created_at")
            }
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Opaque, immutable product identifier.
///
/// Identifiers double as the slug of last resort, so they must themselves
/// be slug-shaped. Generated identifiers are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Validate and construct a [`ProductId`].
    pub fn new(id: impl Into<String>) -> Result<Self, ProductValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ProductValidationError::EmptyId);
        }
        if id.chars().count() > PRODUCT_ID_MAX {
            return Err(ProductValidationError::IdTooLong {
                max: PRODUCT_ID_MAX,
            });
        }
        if !is_valid_slug(&id) {
            return Err(ProductValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Slug used when a product name normalises to nothing: the first
    /// [`FALLBACK_SLUG_LEN`] characters of the identifier.
    pub fn fallback_slug(&self) -> Slug {
        let prefix: String = self.0.chars().take(FALLBACK_SLUG_LEN).collect();
        // The identifier is slug-shaped, so its prefix can only break the
        // invariants by ending on a hyphen.
        Slug::new(prefix.trim_end_matches('-')).unwrap_or_else(|_| {
            unreachable!("prefix of a slug-shaped id is a valid slug")
        })
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Editor-facing display name. Free text in any script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Validate and construct a [`ProductName`], trimming surrounding
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ProductValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if trimmed.chars().count() > PRODUCT_NAME_MAX {
            return Err(ProductValidationError::NameTooLong {
                max: PRODUCT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validate an optional description, normalising blank text to `None`.
pub fn validate_description(
    description: Option<String>,
) -> Result<Option<String>, ProductValidationError> {
    let Some(description) = description else {
        return Ok(None);
    };
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > PRODUCT_DESCRIPTION_MAX {
        return Err(ProductValidationError::DescriptionTooLong {
            max: PRODUCT_DESCRIPTION_MAX,
        });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Unvalidated product fields used to build a [`Product`].
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub id: ProductId,
    pub name: ProductName,
    pub slug: Option<Slug>,
    pub description: Option<String>,
    pub price_minor_units: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalogue product.
///
/// ## Invariants
/// - `price_minor_units` is non-negative.
/// - `description`, when present, is non-blank and within
///   [`PRODUCT_DESCRIPTION_MAX`].
/// - `updated_at` is not earlier than `created_at`.
/// - `slug`, once assigned, is never recomputed from a new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: ProductName,
    slug: Option<Slug>,
    description: Option<String>,
    price_minor_units: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Validate a draft and construct a product.
    pub fn new(draft: ProductDraft) -> Result<Self, ProductValidationError> {
        let ProductDraft {
            id,
            name,
            slug,
            description,
            price_minor_units,
            created_at,
            updated_at,
        } = draft;
        if price_minor_units < 0 {
            return Err(ProductValidationError::NegativePrice);
        }
        if updated_at < created_at {
            return Err(ProductValidationError::UpdatedBeforeCreated);
        }
        Ok(Self {
            id,
            name,
            slug,
            description: validate_description(description)?,
            price_minor_units,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn slug(&self) -> Option<&Slug> {
        self.slug.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_minor_units(&self) -> i64 {
        self.price_minor_units
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Attach a resolved slug. Has no effect once a slug is present.
    #[must_use]
    pub fn with_slug(mut self, slug: Slug) -> Self {
        if self.slug.is_none() {
            self.slug = Some(slug);
        }
        self
    }

    /// Apply editor changes. The slug is left untouched.
    pub fn apply_changes(
        &mut self,
        changes: ProductChanges,
        now: DateTime<Utc>,
    ) -> Result<(), ProductValidationError> {
        let ProductChanges {
            name,
            description,
            price_minor_units,
        } = changes;
        if price_minor_units.is_some_and(|price| price < 0) {
            return Err(ProductValidationError::NegativePrice);
        }
        let description = description
            .map(|text| validate_description(Some(text)))
            .transpose()?;

        if let Some(price) = price_minor_units {
            self.price_minor_units = price;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(name) = name {
            self.name = name;
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }
}

/// Partial update applied by [`Product::apply_changes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<ProductName>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub price_minor_units: Option<i64>,
}
