//! Tab view coordinator
//!
//! The `TabView` owns all tab state: the fixed slot set, the selection, the
//! activation set, the load table, and the runtime driving fetch tasks. The
//! render surface is stateless; it subscribes for events and reads back
//! through `render`.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use folio_loader::{ChangeNotifier, ContentSource, LoadRuntime};
use folio_slots::{ActivationSet, LoadPhase, Slot, SlotError, SlotId, SlotTable};

use crate::error::CoreError;
use crate::events::{SubscriptionId, Subscribers, TabEvent};
use crate::render::Rendering;
use crate::Result;

/// Lifecycle-gated content loader for a fixed tab strip.
///
/// Each deferred slot's content is fetched exactly once, lazily, on the
/// slot's first selection; revisits render whatever is already there. The
/// view is the single owner of its load tasks: dropping it (or calling
/// [`TabView::shutdown`]) cancels anything in flight.
///
/// Must be constructed inside a tokio runtime, since the initially selected
/// slot may schedule a load immediately.
pub struct TabView<T> {
    slots: HashMap<SlotId, Slot>,
    /// Display order of the strip
    order: Vec<SlotId>,
    table: SlotTable<T>,
    runtime: LoadRuntime<T>,
    activations: RwLock<ActivationSet>,
    selected: RwLock<SlotId>,
    subscribers: Arc<Subscribers>,
    closed: AtomicBool,
}

impl<T: Clone + Send + Sync + 'static> TabView<T> {
    /// Build a view over a fixed slot set with `initial` selected. The
    /// initial slot counts as activated, so a deferred initial slot starts
    /// loading right away.
    pub fn new(
        slots: Vec<Slot>,
        initial: SlotId,
        source: Arc<dyn ContentSource<T>>,
    ) -> Result<Self> {
        if slots.is_empty() {
            return Err(CoreError::NoSlots);
        }

        let order: Vec<SlotId> = slots.iter().map(|s| s.id).collect();
        let slots: HashMap<SlotId, Slot> = slots.into_iter().map(|s| (s.id, s)).collect();

        if !slots.contains_key(&initial) {
            return Err(SlotError::UnknownSlot(initial).into());
        }

        let table = SlotTable::new(order.iter().copied());
        let subscribers = Arc::new(Subscribers::new());

        let notifier: ChangeNotifier = {
            let subscribers = Arc::clone(&subscribers);
            let table = table.clone();
            Arc::new(move |slot| {
                if let Ok(phase) = table.phase_of(slot) {
                    subscribers.notify(&TabEvent::LoadStateChanged { slot, phase });
                }
            })
        };

        let runtime = LoadRuntime::new(table.clone(), source, notifier);

        let mut activations = ActivationSet::new();
        activations.activate(initial);

        let view = Self {
            slots,
            order,
            table,
            runtime,
            activations: RwLock::new(activations),
            selected: RwLock::new(initial),
            subscribers,
            closed: AtomicBool::new(false),
        };

        tracing::info!(initial = %initial, slots = view.order.len(), "Tab view created");

        if view.slots[&initial].requires_load() {
            view.start_load(initial)?;
        }

        Ok(view)
    }

    /// Make `slot` the visible one. On a deferred slot's first activation
    /// this schedules exactly one load; re-selecting an already-activated
    /// slot never fetches again.
    pub fn select_slot(&self, slot: SlotId) -> Result<()> {
        self.ensure_open()?;

        let slot_def = self
            .slots
            .get(&slot)
            .ok_or(SlotError::UnknownSlot(slot))?;

        {
            let mut selected = self.selected.write();
            if *selected == slot {
                return Ok(());
            }
            *selected = slot;
        }

        tracing::info!(slot = %slot, title = %slot_def.title, "Selected slot");
        self.subscribers.notify(&TabEvent::SelectionChanged { slot });

        let first = self.activations.write().activate(slot);
        if first {
            tracing::info!(slot = %slot, "Slot activated");
            self.subscribers.notify(&TabEvent::SlotActivated { slot });

            if slot_def.requires_load() {
                self.start_load(slot)?;
            }
        }

        Ok(())
    }

    /// Explicit retry hook for a failed load. The failed state is the only
    /// one a retry is accepted from; loads are otherwise once-per-lifetime.
    pub fn retry(&self, slot: SlotId) -> Result<()> {
        self.ensure_open()?;

        if !self.slots.contains_key(&slot) {
            return Err(SlotError::UnknownSlot(slot).into());
        }

        let phase = self.table.phase_of(slot)?;
        if phase != LoadPhase::Failed {
            return Err(SlotError::InvalidTransition {
                from: phase,
                to: LoadPhase::Loading,
            }
            .into());
        }

        tracing::info!(slot = %slot, "Retrying failed load");
        self.start_load(slot)
    }

    /// What the surface should draw for `slot` right now
    pub fn render(&self, slot: SlotId) -> Result<Rendering<T>> {
        let state = self.table.snapshot(slot)?;
        Ok(Rendering::from_state(&state))
    }

    pub fn selected_slot(&self) -> SlotId {
        *self.selected.read()
    }

    /// Slots in display order
    pub fn slots(&self) -> Vec<Slot> {
        self.order.iter().map(|id| self.slots[id].clone()).collect()
    }

    pub fn slot(&self, slot: SlotId) -> Result<Slot> {
        self.slots
            .get(&slot)
            .cloned()
            .ok_or_else(|| SlotError::UnknownSlot(slot).into())
    }

    pub fn is_activated(&self, slot: SlotId) -> bool {
        self.activations.read().contains(slot)
    }

    pub fn phase_of(&self, slot: SlotId) -> Result<LoadPhase> {
        Ok(self.table.phase_of(slot)?)
    }

    /// Register a render-surface listener; fired on every selection change
    /// and load-state transition
    pub fn subscribe(
        &self,
        listener: impl Fn(&TabEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Tear the view down: cancel in-flight loads and stop notifying. A
    /// completion racing the shutdown is dropped, never applied.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!("Tab view shut down");
        self.runtime.shutdown();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(CoreError::ViewClosed);
        }
        Ok(())
    }

    fn start_load(&self, slot: SlotId) -> Result<()> {
        let request = self.table.begin_load(slot)?;
        self.subscribers.notify(&TabEvent::LoadStateChanged {
            slot,
            phase: LoadPhase::Loading,
        });
        self.runtime.spawn_load(slot, request);
        Ok(())
    }
}

impl<T> Drop for TabView<T> {
    fn drop(&mut self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.runtime.shutdown();
        }
    }
}
