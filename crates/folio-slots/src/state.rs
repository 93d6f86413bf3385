//! Load Lifecycle State Machine
//!
//! ```text
//! NotStarted
//!   ↓ first activation
//! Loading
//!   ↓ fetch resolves        ↓ fetch fails
//! Loaded                  Failed
//!                           ↓ explicit retry
//!                         Loading
//! ```
//!
//! `Loaded` is terminal: content is never re-fetched on revisit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle discriminant for a slot's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// No fetch has ever been scheduled
    NotStarted,
    /// A fetch task is in flight
    Loading,
    /// Content arrived and is held for the slot's lifetime
    Loaded,
    /// The fetch failed; waiting for an explicit retry
    Failed,
}

impl LoadPhase {
    /// Check if transition to another phase is valid
    pub fn can_transition_to(&self, target: LoadPhase) -> bool {
        match (self, target) {
            // First activation schedules the load
            (LoadPhase::NotStarted, LoadPhase::Loading) => true,
            // The in-flight task settles one way or the other
            (LoadPhase::Loading, LoadPhase::Loaded) => true,
            (LoadPhase::Loading, LoadPhase::Failed) => true,
            // Only an explicit retry leaves Failed
            (LoadPhase::Failed, LoadPhase::Loading) => true,
            // Everything else, including Loading -> Loading, is invalid
            _ => false,
        }
    }

    /// Returns true once the load has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadPhase::Loaded | LoadPhase::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPhase::NotStarted => "not_started",
            LoadPhase::Loading => "loading",
            LoadPhase::Loaded => "loaded",
            LoadPhase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full per-slot load state, payload included
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotStarted,
    Loading {
        /// Id of the task that owns this load; completions carrying any
        /// other id are stale and must be ignored
        request: Uuid,
        started_at: DateTime<Utc>,
    },
    Loaded {
        value: T,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

impl<T> LoadState<T> {
    pub fn phase(&self) -> LoadPhase {
        match self {
            LoadState::NotStarted => LoadPhase::NotStarted,
            LoadState::Loading { .. } => LoadPhase::Loading,
            LoadState::Loaded { .. } => LoadPhase::Loaded,
            LoadState::Failed { .. } => LoadPhase::Failed,
        }
    }

    /// The loaded value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Id of the in-flight load, if one exists
    pub fn request(&self) -> Option<Uuid> {
        match self {
            LoadState::Loading { request, .. } => Some(*request),
            _ => None,
        }
    }
}
