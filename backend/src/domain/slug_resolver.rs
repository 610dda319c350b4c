//! Collision-free slug assignment for products.
//!
//! The resolver probes the slug namespace through [`ProductSlugLookup`],
//! appending `-1`, `-2`, ... to the normalised name until it finds a slug no
//! other product owns. Probes are sequential and uncoordinated: two
//! resolvers racing on the same base may pick the same candidate, and the
//! unique index on `products.slug` rejects the second write.

use tracing::debug;

use super::ports::{ProductRepositoryError, ProductSlugLookup};
use super::{ProductId, Slug, normalize_slug};

/// Resolve a unique slug for the product `id` named `name`.
///
/// When the name normalises to nothing the identifier prefix from
/// [`ProductId::fallback_slug`] is used as the base instead. The product's
/// own slug never counts as a collision, so re-resolving an already-slugged
/// product yields its current slug.
///
/// # Errors
///
/// Returns the lookup's error unchanged; no retry is attempted.
pub async fn resolve_slug<L>(
    name: &str,
    id: &ProductId,
    lookup: &L,
) -> Result<Slug, ProductRepositoryError>
where
    L: ProductSlugLookup + ?Sized,
{
    let base = Slug::new(normalize_slug(name)).unwrap_or_else(|_| id.fallback_slug());

    let mut candidate = base.clone();
    let mut counter: u64 = 1;
    while lookup.exists_with_slug_excluding_id(&candidate, id).await? {
        debug!(product_id = %id, slug = %candidate, "slug taken, trying next suffix");
        candidate = base.with_suffix(counter);
        counter += 1;
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mockall::predicate::always;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MockProductSlugLookup;

    /// Slug ownership table keyed by slug.
    #[derive(Default)]
    struct OwnedSlugs {
        owners: HashMap<String, String>,
        probes: Mutex<Vec<String>>,
    }

    impl OwnedSlugs {
        fn owned(entries: &[(&str, &str)]) -> Self {
            Self {
                owners: entries
                    .iter()
                    .map(|(slug, id)| ((*slug).to_owned(), (*id).to_owned()))
                    .collect(),
                probes: Mutex::default(),
            }
        }

        fn probes(&self) -> Vec<String> {
            self.probes.lock().expect("probes poisoned").clone()
        }
    }

    #[async_trait]
    impl ProductSlugLookup for OwnedSlugs {
        async fn exists_with_slug_excluding_id(
            &self,
            slug: &Slug,
            exclude_id: &ProductId,
        ) -> Result<bool, ProductRepositoryError> {
            self.probes
                .lock()
                .expect("probes poisoned")
                .push(slug.as_str().to_owned());
            Ok(self
                .owners
                .get(slug.as_str())
                .is_some_and(|owner| owner != exclude_id.as_str()))
        }
    }

    fn id(value: &str) -> ProductId {
        ProductId::new(value).expect("valid id")
    }

    #[tokio::test]
    async fn free_slug_is_returned_after_one_probe() {
        let lookup = OwnedSlugs::default();
        let slug = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "rose-oil");
        assert_eq!(lookup.probes(), vec!["rose-oil"]);
    }

    #[tokio::test]
    async fn taken_slug_gets_first_suffix() {
        let lookup = OwnedSlugs::owned(&[("rose-oil", "p2")]);
        let slug = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "rose-oil-1");
    }

    #[tokio::test]
    async fn suffixes_count_up_from_the_base() {
        let lookup = OwnedSlugs::owned(&[
            ("rose-oil", "p2"),
            ("rose-oil-1", "p3"),
            ("rose-oil-2", "p4"),
        ]);
        let slug = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "rose-oil-3");
        assert_eq!(
            lookup.probes(),
            vec!["rose-oil", "rose-oil-1", "rose-oil-2", "rose-oil-3"]
        );
    }

    #[tokio::test]
    async fn own_slug_is_not_a_collision() {
        let lookup = OwnedSlugs::owned(&[("rose-oil", "p1")]);
        let slug = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "rose-oil");
    }

    #[rstest]
    #[case("", "abcdefghij", "abcdefgh")]
    #[case("!!!", "abcdefghij", "abcdefgh")]
    #[case("   ", "3fa85f64-5717-4562", "3fa85f64")]
    #[case("", "abcdefg-hij", "abcdefg")]
    #[case("", "p1", "p1")]
    #[tokio::test]
    async fn empty_names_fall_back_to_identifier_prefix(
        #[case] name: &str,
        #[case] product_id: &str,
        #[case] expected: &str,
    ) {
        let lookup = OwnedSlugs::default();
        let slug = resolve_slug(name, &id(product_id), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), expected);
    }

    #[tokio::test]
    async fn fallback_base_is_suffixed_on_collision() {
        let lookup = OwnedSlugs::owned(&[("abcdefgh", "abcdefghzz")]);
        let slug = resolve_slug("", &id("abcdefghij"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "abcdefgh-1");
    }

    #[tokio::test]
    async fn arabic_names_keep_their_script() {
        let lookup = OwnedSlugs::owned(&[("گل-رز", "p2")]);
        let slug = resolve_slug("گل رز", &id("p1"), &lookup)
            .await
            .expect("resolves");
        assert_eq!(slug.as_str(), "گل-رز-1");
    }

    #[tokio::test]
    async fn lookup_errors_propagate_unchanged() {
        let mut lookup = MockProductSlugLookup::new();
        lookup
            .expect_exists_with_slug_excluding_id()
            .with(always(), always())
            .times(1)
            .return_once(|_, _| Err(ProductRepositoryError::connection("pool closed")));

        let err = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect_err("lookup failure");
        assert_eq!(err, ProductRepositoryError::connection("pool closed"));
    }

    #[tokio::test]
    async fn lookup_failure_mid_probe_stops_resolution() {
        let mut lookup = MockProductSlugLookup::new();
        let mut seq = mockall::Sequence::new();
        lookup
            .expect_exists_with_slug_excluding_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(true));
        lookup
            .expect_exists_with_slug_excluding_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|slug, _| {
                assert_eq!(slug.as_str(), "rose-oil-1");
                Err(ProductRepositoryError::query("timeout"))
            });

        let err = resolve_slug("Rose Oil", &id("p1"), &lookup)
            .await
            .expect_err("lookup failure");
        assert_eq!(err, ProductRepositoryError::query("timeout"));
    }
}
