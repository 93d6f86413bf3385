//! Load runtime
//!
//! One cancellable tokio task per in-flight load. Each task races its fetch
//! against a per-slot watch channel; teardown sends `Cancel` to every
//! channel and flips a closed flag, after which no completion may touch the
//! slot table or notify anyone.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use folio_slots::{SlotId, SlotTable};

use crate::source::ContentSource;
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadControl {
    Continue,
    Cancel,
}

/// Called after a load settles and its outcome lands in the table; the
/// owning view uses this to wake its subscribers.
pub type ChangeNotifier = Arc<dyn Fn(SlotId) + Send + Sync>;

pub struct LoadRuntime<T> {
    table: SlotTable<T>,
    source: Arc<dyn ContentSource<T>>,
    notifier: ChangeNotifier,
    /// One control channel per in-flight load
    jobs: Arc<RwLock<HashMap<SlotId, tokio::sync::watch::Sender<LoadControl>>>>,
    closed: Arc<AtomicBool>,
}

impl<T> LoadRuntime<T> {
    /// Number of in-flight load tasks
    pub fn in_flight(&self) -> usize {
        self.jobs.read().len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Cancel every in-flight load and refuse further work. Completions
    /// that race the cancellation are dropped by the closed flag.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let jobs = self.jobs.read();
        for (slot, tx) in jobs.iter() {
            tracing::debug!(slot = %slot, "Cancelling in-flight load");
            let _ = tx.send(LoadControl::Cancel);
        }

        tracing::info!(cancelled = jobs.len(), "Load runtime shut down");
    }
}

impl<T: Clone + Send + Sync + 'static> LoadRuntime<T> {
    pub fn new(
        table: SlotTable<T>,
        source: Arc<dyn ContentSource<T>>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            table,
            source,
            notifier,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawn the task for a load already registered with the table.
    /// `request` is the id handed out by `SlotTable::begin_load`; a slot
    /// with a task already in flight is left alone.
    pub fn spawn_load(&self, slot: SlotId, request: Uuid) {
        if self.is_closed() {
            tracing::warn!(slot = %slot, "Ignoring load on closed runtime");
            return;
        }

        if self.jobs.read().contains_key(&slot) {
            tracing::debug!(slot = %slot, "Load already in flight");
            return;
        }

        tracing::info!(slot = %slot, request = %request, "Starting load");

        let (tx, mut control) = tokio::sync::watch::channel(LoadControl::Continue);
        self.jobs.write().insert(slot, tx);

        let jobs = Arc::clone(&self.jobs);
        let closed = Arc::clone(&self.closed);
        let table = self.table.clone();
        let notifier = Arc::clone(&self.notifier);
        let fetch = self.source.fetch(slot);

        tokio::spawn(async move {
            tokio::select! {
                // Only `Cancel` is ever sent; a closed channel means the
                // owner is gone. Either way the fetch is dropped unfinished.
                _ = control.changed() => {
                    tracing::debug!(slot = %slot, request = %request, "Load cancelled");
                }
                outcome = fetch => {
                    apply_outcome(&table, &notifier, &closed, slot, request, outcome);
                }
            }

            jobs.write().remove(&slot);
        });
    }
}

impl<T> Clone for LoadRuntime<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            source: Arc::clone(&self.source),
            notifier: Arc::clone(&self.notifier),
            jobs: Arc::clone(&self.jobs),
            closed: Arc::clone(&self.closed),
        }
    }
}

fn apply_outcome<T: Clone>(
    table: &SlotTable<T>,
    notifier: &ChangeNotifier,
    closed: &AtomicBool,
    slot: SlotId,
    request: Uuid,
    outcome: Result<T>,
) {
    if closed.load(Ordering::SeqCst) {
        tracing::debug!(slot = %slot, request = %request, "Dropping outcome after shutdown");
        return;
    }

    let applied = match outcome {
        Ok(value) => table.complete_load(slot, request, value),
        Err(e) => {
            tracing::warn!(slot = %slot, error = %e, "Load failed");
            table.fail_load(slot, request, e.to_string())
        }
    };

    match applied {
        Ok(true) => notifier(slot),
        Ok(false) => {
            tracing::debug!(slot = %slot, request = %request, "Stale outcome ignored");
        }
        Err(e) => {
            tracing::warn!(slot = %slot, error = %e, "Failed to record load outcome");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::source::FixedDelaySource;
    use folio_slots::LoadPhase;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(100);

    struct Fixture {
        table: SlotTable<&'static str>,
        runtime: LoadRuntime<&'static str>,
        notified: Arc<AtomicUsize>,
    }

    fn fixture(source: FixedDelaySource<&'static str>) -> Fixture {
        let table = SlotTable::new([SlotId(0), SlotId(1)]);
        let notified = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&notified);
        let notifier: ChangeNotifier = Arc::new(move |_slot| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let runtime = LoadRuntime::new(table.clone(), Arc::new(source), notifier);

        Fixture {
            table,
            runtime,
            notified,
        }
    }

    /// Sleep past the source delay; paused time advances instantly
    async fn settle() {
        tokio::time::sleep(DELAY * 2).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_completes_and_notifies() {
        let fx = fixture(FixedDelaySource::new(DELAY).with_payload(SlotId(1), "catalog"));

        let request = fx.table.begin_load(SlotId(1)).unwrap();
        fx.runtime.spawn_load(SlotId(1), request);
        assert_eq!(fx.runtime.in_flight(), 1);

        settle().await;

        assert_eq!(fx.table.phase_of(SlotId(1)).unwrap(), LoadPhase::Loaded);
        assert_eq!(fx.table.snapshot(SlotId(1)).unwrap().value(), Some(&"catalog"));
        assert_eq!(fx.notified.load(Ordering::SeqCst), 1);
        assert_eq!(fx.runtime.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_stored_not_thrown() {
        let fx = fixture(FixedDelaySource::new(DELAY).with_failure(SlotId(1), FetchError::Timeout));

        let request = fx.table.begin_load(SlotId(1)).unwrap();
        fx.runtime.spawn_load(SlotId(1), request);

        settle().await;

        assert_eq!(fx.table.phase_of(SlotId(1)).unwrap(), LoadPhase::Failed);
        assert_eq!(
            fx.table.snapshot(SlotId(1)).unwrap().error(),
            Some("Fetch timed out")
        );
        assert_eq!(fx.notified.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_spawn_is_ignored() {
        let fx = fixture(FixedDelaySource::new(DELAY).with_payload(SlotId(1), "catalog"));

        let request = fx.table.begin_load(SlotId(1)).unwrap();
        fx.runtime.spawn_load(SlotId(1), request);
        fx.runtime.spawn_load(SlotId(1), request);
        assert_eq!(fx.runtime.in_flight(), 1);

        settle().await;

        // Exactly one task ran and one notification fired
        assert_eq!(fx.notified.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_in_flight_load() {
        let fx = fixture(FixedDelaySource::new(DELAY).with_payload(SlotId(1), "catalog"));

        let request = fx.table.begin_load(SlotId(1)).unwrap();
        fx.runtime.spawn_load(SlotId(1), request);

        fx.runtime.shutdown();
        settle().await;

        // The late completion neither mutated the table nor notified
        assert_eq!(fx.table.phase_of(SlotId(1)).unwrap(), LoadPhase::Loading);
        assert_eq!(fx.notified.load(Ordering::SeqCst), 0);
        assert_eq!(fx.runtime.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawn_after_shutdown_is_refused() {
        let fx = fixture(FixedDelaySource::new(DELAY).with_payload(SlotId(1), "catalog"));

        fx.runtime.shutdown();

        let request = fx.table.begin_load(SlotId(1)).unwrap();
        fx.runtime.spawn_load(SlotId(1), request);
        assert_eq!(fx.runtime.in_flight(), 0);

        settle().await;
        assert_eq!(fx.notified.load(Ordering::SeqCst), 0);
    }
}
