//! Per-request correlation identifier.
//!
//! The trace middleware runs each request inside [`TraceId::scope`]; anything
//! on that task, such as [`super::Error`] constructors, can read it back with
//! [`TraceId::current`]. Task-locals do not follow `tokio::spawn`, so spawned
//! work must be wrapped in its own `scope`.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one HTTP request in logs, headers and error bodies.
///
/// ```
/// use crm_backend::TraceId;
///
/// let id: TraceId = "6f1c2b1e-0d3a-4c55-9e0f-1a2b3c4d5e6f".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c2b1e-0d3a-4c55-9e0f-1a2b3c4d5e6f");
/// assert!(TraceId::current().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being handled on this task, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<F: Future>(trace_id: Self, fut: F) -> F::Output {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
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
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_sets_and_clears_current() {
        let id = TraceId::generate();

        let inside = TraceId::scope(id, async { TraceId::current() }).await;

        assert_eq!(inside, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();

        let seen = TraceId::scope(outer, async move {
            TraceId::scope(inner, async { TraceId::current() }).await
        })
        .await;

        assert_eq!(seen, Some(inner));
    }

    #[rstest]
    #[case("not-a-trace")]
    #[case("")]
    fn rejects_non_uuid_text(#[case] text: &str) {
        assert!(text.parse::<TraceId>().is_err());
    }
}
