//! Content source boundary
//!
//! The data source is injected into the view at construction; the core
//! calls `fetch` exactly once per slot per activation-then-load cycle (and
//! once more per explicit retry).

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::time::Duration;

use folio_slots::SlotId;

use crate::error::FetchError;
use crate::Result;

/// Asynchronous provider of slot content
pub trait ContentSource<T>: Send + Sync {
    fn fetch(&self, slot: SlotId) -> BoxFuture<'static, Result<T>>;
}

/// Simulated source: per-slot outcomes behind a single fixed delay.
///
/// Stands in for a real fetch in the demo and in tests; the delay models
/// network latency and nothing else.
pub struct FixedDelaySource<T> {
    delay: Duration,
    outcomes: HashMap<SlotId, Result<T>>,
}

impl<T: Clone + Send + 'static> FixedDelaySource<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            outcomes: HashMap::new(),
        }
    }

    /// Resolve `slot` with `value` after the delay
    pub fn with_payload(mut self, slot: SlotId, value: T) -> Self {
        self.outcomes.insert(slot, Ok(value));
        self
    }

    /// Reject `slot` with `error` after the delay
    pub fn with_failure(mut self, slot: SlotId, error: FetchError) -> Self {
        self.outcomes.insert(slot, Err(error));
        self
    }
}

impl<T: Clone + Send + Sync + 'static> ContentSource<T> for FixedDelaySource<T> {
    fn fetch(&self, slot: SlotId) -> BoxFuture<'static, Result<T>> {
        let delay = self.delay;
        let outcome = self.outcomes.get(&slot).cloned().unwrap_or_else(|| {
            Err(FetchError::Unavailable(format!(
                "no content configured for slot {}",
                slot
            )))
        });

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_source() {
        let source = FixedDelaySource::new(Duration::from_millis(100))
            .with_payload(SlotId(1), "catalog")
            .with_failure(SlotId(2), FetchError::Timeout);

        assert_eq!(source.fetch(SlotId(1)).await, Ok("catalog"));
        assert_eq!(source.fetch(SlotId(2)).await, Err(FetchError::Timeout));

        // Unconfigured slots fail instead of hanging
        assert!(matches!(
            source.fetch(SlotId(9)).await,
            Err(FetchError::Unavailable(_))
        ));
    }
}
