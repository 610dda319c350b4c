//! Slug normalisation and validation for catalogue records.
//!
//! Slugs are URL-safe tokens derived from free-text display names. They are
//! composed of lowercase ASCII letters, ASCII digits, single hyphens, and code
//! points from the Arabic script blocks so Persian and Arabic product names
//! keep a readable slug instead of collapsing to nothing.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Unicode ranges admitted in slugs in addition to `[a-z0-9-]`.
///
/// Arabic, Arabic Supplement, and both Arabic presentation-form blocks.
pub const SLUG_SCRIPT_RANGES: [RangeInclusive<char>; 4] = [
    '\u{0600}'..='\u{06FF}',
    '\u{0750}'..='\u{077F}',
    '\u{FB50}'..='\u{FDFF}',
    '\u{FE70}'..='\u{FEFF}',
];

/// Number of identifier characters used when a name normalises to nothing.
pub const FALLBACK_SLUG_LEN: usize = 8;

/// Normalise free text into a slug.
///
/// The transformation trims, lowercases, turns whitespace runs into single
/// hyphens, drops every character outside the slug alphabet, then collapses
/// and strips hyphens. It never fails; text with no permitted characters
/// yields an empty string, which callers must handle.
///
/// # Examples
/// ```
/// use storefront::domain::normalize_slug;
///
/// assert_eq!(normalize_slug("  Rose   Oil!!  "), "rose-oil");
/// assert_eq!(normalize_slug("گل رز"), "گل-رز");
/// assert_eq!(normalize_slug("!!!"), "");
/// ```
#[must_use]
pub fn normalize_slug(text: &str) -> String {
    let lowered = text.trim_matches(is_slug_whitespace).to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if is_slug_whitespace(ch) {
            if !in_whitespace {
                push_hyphen(&mut slug);
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch == '-' {
            push_hyphen(&mut slug);
        } else if is_slug_char(ch) {
            slug.push(ch);
        }
    }

    slug.trim_matches('-').to_owned()
}

/// Return `true` when `value` is a valid slug.
///
/// Valid slugs are non-empty, contain only slug characters, and neither
/// start nor end with a hyphen nor contain two hyphens in a row.
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value.chars().all(|ch| ch == '-' || is_slug_char(ch))
}

/// Return `true` for characters that may appear in a slug besides `-`.
pub fn is_slug_char(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || SLUG_SCRIPT_RANGES.iter().any(|range| range.contains(&ch))
}

// Unicode `White_Space` without U+0085 (NEL), plus U+FEFF. Existing slugs
// were produced with this set and must normalise the same.
fn is_slug_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{0085}') || ch == '\u{FEFF}'
}

// Adjacent hyphens collapse as they are written.
fn push_hyphen(slug: &mut String) {
    if !slug.ends_with('-') {
        slug.push('-');
    }
}

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::InvalidFormat => write!(
                f,
                "slug may only contain lowercase letters, digits, Arabic script, and single inner hyphens",
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

/// Validated URL slug.
///
/// ## Invariants
/// - Satisfies [`is_valid_slug`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate and construct a [`Slug`].
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if !is_valid_slug(&value) {
            return Err(SlugValidationError::InvalidFormat);
        }
        Ok(Self(value))
    }

    /// Append a numeric disambiguation suffix, e.g. `rose-oil` → `rose-oil-2`.
    #[must_use]
    pub fn with_suffix(&self, counter: u64) -> Self {
        // A valid slug followed by `-<digits>` is still valid.
        Self(format!("{}-{counter}", self.0))
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
