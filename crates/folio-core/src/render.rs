//! Render decision
//!
//! `render` is a pure function of a slot's load state. The surface decides
//! what the four outcomes look like; the core only decides which one it is.

use serde::Serialize;

use folio_slots::LoadState;

/// What the render surface should draw for a slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view", content = "data")]
pub enum Rendering<T> {
    /// Nothing fetched and nothing in flight; static slots always render
    /// this, with their built-in content standing in
    Placeholder,
    /// A load is in flight
    LoadingIndicator,
    /// The fetched content
    Content(T),
    /// The stored failure, with a retry affordance expected around it
    ErrorView(String),
}

impl<T: Clone> Rendering<T> {
    pub fn from_state(state: &LoadState<T>) -> Self {
        match state {
            LoadState::NotStarted => Rendering::Placeholder,
            LoadState::Loading { .. } => Rendering::LoadingIndicator,
            LoadState::Loaded { value, .. } => Rendering::Content(value.clone()),
            LoadState::Failed { error, .. } => Rendering::ErrorView(error.clone()),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_render_mapping() {
        assert_eq!(
            Rendering::<u32>::from_state(&LoadState::NotStarted),
            Rendering::Placeholder
        );
        assert_eq!(
            Rendering::<u32>::from_state(&LoadState::Loading {
                request: Uuid::new_v4(),
                started_at: Utc::now(),
            }),
            Rendering::LoadingIndicator
        );
        assert_eq!(
            Rendering::from_state(&LoadState::Loaded {
                value: 7,
                loaded_at: Utc::now(),
            }),
            Rendering::Content(7)
        );
        assert_eq!(
            Rendering::<u32>::from_state(&LoadState::Failed {
                error: "timeout".to_string(),
                failed_at: Utc::now(),
            }),
            Rendering::ErrorView("timeout".to_string())
        );
    }
}
