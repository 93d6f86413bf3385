//! Observer subscriptions
//!
//! The render surface subscribes here and redraws on every event. This is
//! an explicit listener list, not a UI-framework state primitive: any write
//! to tab state ends in a `notify` that fans out to all subscribers.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use folio_slots::{LoadPhase, SlotId};

/// Notification sent to render surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum TabEvent {
    /// The visible slot changed
    SelectionChanged { slot: SlotId },
    /// A slot was selected for the first time
    SlotActivated { slot: SlotId },
    /// A slot's load lifecycle moved
    LoadStateChanged { slot: SlotId, phase: LoadPhase },
}

impl TabEvent {
    pub fn slot(&self) -> SlotId {
        match self {
            TabEvent::SelectionChanged { slot }
            | TabEvent::SlotActivated { slot }
            | TabEvent::LoadStateChanged { slot, .. } => *slot,
        }
    }
}

/// Handle returned by `subscribe`; pass back to `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&TabEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Thread-safe listener list
#[derive(Default)]
pub struct Subscribers {
    registry: RwLock<Registry>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&TabEvent) + Send + Sync + 'static) -> SubscriptionId {
        let mut registry = self.registry.write();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Arc::new(listener));
        SubscriptionId(id)
    }

    /// Returns whether the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.write().listeners.remove(&id.0).is_some()
    }

    pub fn len(&self) -> usize {
        self.registry.read().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.read().listeners.is_empty()
    }

    /// Fan an event out to every listener. Listeners run outside the lock,
    /// so one of them may subscribe or unsubscribe without deadlocking.
    pub fn notify(&self, event: &TabEvent) {
        let listeners: Vec<Listener> = self.registry.read().listeners.values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_notify_unsubscribe() {
        let subscribers = Subscribers::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        let id = subscribers.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(subscribers.len(), 1);

        subscribers.notify(&TabEvent::SelectionChanged { slot: SlotId(1) });
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));

        subscribers.notify(&TabEvent::SelectionChanged { slot: SlotId(1) });
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_slot_accessor() {
        let event = TabEvent::LoadStateChanged {
            slot: SlotId(3),
            phase: LoadPhase::Loading,
        };
        assert_eq!(event.slot(), SlotId(3));
    }
}
