//! Per-view orchestration of remote fetches.
//!
//! A controller never awaits while holding its own state: every trigger
//! (`mount`, page change, filter change) bumps the controller's generation,
//! resets the state to loading and hands back a fetch ticket. The caller
//! performs the remote call and passes the outcome to `resolve`, which only
//! applies it when the ticket is still current. The displayed state therefore
//! always reflects the most recently issued request, whatever order the
//! responses arrive in.

use std::future::Future;
use std::time::Duration;

use crate::client::{TransportError, TransportResult};

pub mod detail;
pub mod list;
pub mod router;

pub use detail::{DetailController, DetailFetch};
pub use list::{ListController, ListFetch};
pub use router::{ErrorRouter, Navigation};

/// Monotonic token identifying the trigger a fetch belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Whether `resolve` wrote the outcome into the controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer trigger was issued, or the view unmounted, before the outcome
    /// arrived.
    Stale,
}

/// Awaits `fut`, failing with [`TransportError::Timeout`] once `ceiling`
/// elapses.
pub async fn with_ceiling<T, F>(ceiling: Duration, fut: F) -> TransportResult<T>
where
    F: Future<Output = TransportResult<T>>,
{
    match tokio::time::timeout(ceiling, fut).await {
        Ok(outcome) => outcome,
        Err(_) => {
            log::error!("Remote call exceeded the {}s ceiling", ceiling.as_secs());
            Err(TransportError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let first = Generation::default();
        let second = first.next();

        assert!(second > first);
        assert_eq!(second.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ceiling_turns_pending_call_into_timeout() {
        let outcome: TransportResult<()> =
            with_ceiling(Duration::from_secs(60), std::future::pending()).await;

        assert_eq!(outcome, Err(TransportError::Timeout));
    }

    #[tokio::test]
    async fn ceiling_passes_through_fast_calls() {
        let outcome = with_ceiling(Duration::from_secs(60), async { Ok(7) }).await;

        assert_eq!(outcome, Ok(7));
    }
}
