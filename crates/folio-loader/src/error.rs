//! Fetch error types

use thiserror::Error;

/// The one failure kind a data source can surface. Failures are stored on
/// the slot, never propagated past the component boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Content unavailable: {0}")]
    Unavailable(String),

    #[error("Fetch timed out")]
    Timeout,
}
