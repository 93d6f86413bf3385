//! Slot State Table
//!
//! Owns every slot's `LoadState` and enforces the transition rules. All
//! writes go through the transition methods; completions must present the
//! request id handed out by `begin_load`, so a superseded task can never
//! overwrite a newer load.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::SlotError;
use crate::slot::SlotId;
use crate::state::{LoadPhase, LoadState};
use crate::Result;

pub struct SlotTable<T> {
    states: Arc<RwLock<HashMap<SlotId, LoadState<T>>>>,
}

impl<T: Clone> SlotTable<T> {
    /// Build a table with every known slot in `NotStarted`
    pub fn new(slots: impl IntoIterator<Item = SlotId>) -> Self {
        let states = slots
            .into_iter()
            .map(|id| (id, LoadState::NotStarted))
            .collect();

        Self {
            states: Arc::new(RwLock::new(states)),
        }
    }

    pub fn phase_of(&self, slot: SlotId) -> Result<LoadPhase> {
        self.states
            .read()
            .get(&slot)
            .map(LoadState::phase)
            .ok_or(SlotError::UnknownSlot(slot))
    }

    /// Cloned view of a slot's full state
    pub fn snapshot(&self, slot: SlotId) -> Result<LoadState<T>> {
        self.states
            .read()
            .get(&slot)
            .cloned()
            .ok_or(SlotError::UnknownSlot(slot))
    }

    /// Move a slot into `Loading` and hand out the request id that owns the
    /// new load. Valid from `NotStarted` (first activation) and `Failed`
    /// (explicit retry); rejecting `Loading -> Loading` is what keeps the
    /// in-flight count per slot at one.
    pub fn begin_load(&self, slot: SlotId) -> Result<Uuid> {
        let mut states = self.states.write();
        let state = states.get_mut(&slot).ok_or(SlotError::UnknownSlot(slot))?;

        let from = state.phase();
        if !from.can_transition_to(LoadPhase::Loading) {
            return Err(SlotError::InvalidTransition {
                from,
                to: LoadPhase::Loading,
            });
        }

        let request = Uuid::new_v4();

        tracing::debug!(
            slot = %slot,
            request = %request,
            from = %from,
            "Load state transition to loading"
        );

        *state = LoadState::Loading {
            request,
            started_at: Utc::now(),
        };

        Ok(request)
    }

    /// Settle a load with its value. Returns whether the write was applied:
    /// a completion for a slot that is no longer `Loading`, or that carries
    /// a stale request id, is a no-op.
    pub fn complete_load(&self, slot: SlotId, request: Uuid, value: T) -> Result<bool> {
        self.settle(slot, request, LoadState::Loaded {
            value,
            loaded_at: Utc::now(),
        })
    }

    /// Settle a load with a failure message. Same staleness rules as
    /// `complete_load`.
    pub fn fail_load(&self, slot: SlotId, request: Uuid, error: impl Into<String>) -> Result<bool> {
        self.settle(slot, request, LoadState::Failed {
            error: error.into(),
            failed_at: Utc::now(),
        })
    }

    fn settle(&self, slot: SlotId, request: Uuid, next: LoadState<T>) -> Result<bool> {
        let mut states = self.states.write();
        let state = states.get_mut(&slot).ok_or(SlotError::UnknownSlot(slot))?;

        if state.request() != Some(request) {
            tracing::debug!(
                slot = %slot,
                request = %request,
                phase = %state.phase(),
                "Ignoring stale load completion"
            );
            return Ok(false);
        }

        tracing::debug!(
            slot = %slot,
            request = %request,
            to = %next.phase(),
            "Load state transition"
        );

        *state = next;
        Ok(true)
    }
}

impl<T> Clone for SlotTable<T> {
    fn clone(&self) -> Self {
        Self {
            states: Arc::clone(&self.states),
        }
    }
}
