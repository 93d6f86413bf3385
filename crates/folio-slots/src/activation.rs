//! Activation bookkeeping
//!
//! The activation set records which slots have ever been selected. It only
//! grows: revisiting a slot changes nothing, which is what makes the lazy
//! load a once-per-lifetime event.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::slot::SlotId;

#[derive(Debug, Default)]
pub struct ActivationSet {
    visited: HashMap<SlotId, DateTime<Utc>>,
}

impl ActivationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activation. Returns true only the first time a slot is seen.
    pub fn activate(&mut self, slot: SlotId) -> bool {
        if self.visited.contains_key(&slot) {
            return false;
        }
        self.visited.insert(slot, Utc::now());
        true
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.visited.contains_key(&slot)
    }

    /// When the slot was first activated
    pub fn activated_at(&self, slot: SlotId) -> Option<DateTime<Utc>> {
        self.visited.get(&slot).copied()
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_activation_only() {
        let mut set = ActivationSet::new();
        assert!(set.is_empty());

        assert!(set.activate(SlotId(1)));
        assert!(set.contains(SlotId(1)));
        assert!(set.activated_at(SlotId(1)).is_some());

        // Revisits are not first activations
        assert!(!set.activate(SlotId(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_never_shrinks() {
        let mut set = ActivationSet::new();
        set.activate(SlotId(0));
        set.activate(SlotId(1));
        set.activate(SlotId(0));
        set.activate(SlotId(1));
        assert_eq!(set.len(), 2);
        assert!(set.contains(SlotId(0)));
        assert!(set.contains(SlotId(1)));
    }
}
