//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Slot error: {0}")]
    Slot(#[from] folio_slots::SlotError),

    #[error("View is shut down")]
    ViewClosed,

    #[error("View needs at least one slot")]
    NoSlots,
}
