//! Slot error types

use thiserror::Error;

use crate::slot::SlotId;
use crate::state::LoadPhase;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Unknown slot: {0}")]
    UnknownSlot(SlotId),

    #[error("Invalid load transition: {from} -> {to}")]
    InvalidTransition { from: LoadPhase, to: LoadPhase },
}
