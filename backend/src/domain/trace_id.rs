//! Request correlation identifier.
//!
//! The HTTP middleware places a `TraceId` in Tokio task-local storage for the
//! duration of each request so domain errors and log lines can be correlated
//! without threading the identifier through every call. Task-locals are not
//! inherited by spawned tasks; wrap spawned work in [`TraceId::scope`].

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation identifier for one request.
///
/// # Examples
/// ```
/// use storefront::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id: TraceId = "6f1c2a44-9d3e-4c8b-a0f7-1b2c3d4e5f60".parse().expect("valid UUID");
/// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Adopt an identifier supplied by an upstream proxy.
    ///
    /// Only hyphenated UUIDs are accepted; anything else is ignored so a
    /// client cannot inject arbitrary text into logs.
    #[must_use]
    pub fn from_header_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != 36 {
            return None;
        }
        Uuid::parse_str(value).ok().map(Self)
    }

    /// The identifier in scope for the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_exposes_current_identifier() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
    }

    #[tokio::test]
    async fn current_is_none_outside_scope() {
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    fn display_is_hyphenated_lowercase() {
        let id = TraceId::from_uuid(Uuid::from_u128(0xABCD));
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-00000000abcd");
    }

    #[rstest]
    #[case("6f1c2a44-9d3e-4c8b-a0f7-1b2c3d4e5f60", true)]
    #[case(" 6f1c2a44-9d3e-4c8b-a0f7-1b2c3d4e5f60 ", true)]
    #[case("6f1c2a449d3e4c8ba0f71b2c3d4e5f60", false)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    fn header_values_must_be_hyphenated_uuids(#[case] value: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_header_value(value).is_some(), accepted);
    }
}
