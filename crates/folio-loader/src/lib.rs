//! FOLIO Load Runtime
//!
//! Runs slot loads as cancellable tokio tasks: at most one in flight per
//! slot, outcomes applied through the slot table's staleness guard, and
//! nothing mutated after the owning view shuts down.

mod error;
mod runtime;
mod source;

pub use error::FetchError;
pub use runtime::{ChangeNotifier, LoadRuntime};
pub use source::{ContentSource, FixedDelaySource};

pub type Result<T> = std::result::Result<T, FetchError>;
