//! Slot data structures

use serde::{Deserialize, Serialize};

/// Identifier for one tab position
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SlotId(pub u32);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a slot's content comes to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    /// Content is part of the view itself and is never fetched
    Static,
    /// Content is fetched lazily on the slot's first activation
    Deferred,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// Position in the tab strip
    pub id: SlotId,
    /// Title shown on the tab
    pub title: String,
    /// Whether the slot's content must be fetched
    pub mode: ContentMode,
}

impl Slot {
    /// A slot whose content is built into the view
    pub fn fixed(id: SlotId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            mode: ContentMode::Static,
        }
    }

    /// A slot whose content is fetched on first activation
    pub fn deferred(id: SlotId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            mode: ContentMode::Deferred,
        }
    }

    pub fn requires_load(&self) -> bool {
        self.mode == ContentMode::Deferred
    }
}
