//! FOLIO Slot Model
//!
//! A tab strip is a fixed set of slots. Each slot owns a load lifecycle:
//! content is fetched at most once, lazily, on the slot's first activation.

mod activation;
mod error;
mod slot;
mod state;
mod table;

pub use activation::ActivationSet;
pub use error::SlotError;
pub use slot::{ContentMode, Slot, SlotId};
pub use state::{LoadPhase, LoadState};
pub use table::SlotTable;

pub type Result<T> = std::result::Result<T, SlotError>;
