//! FOLIO Core
//!
//! Central coordination layer: the `TabView` owns all tab state; a render
//! surface is a stateless subscriber that redraws whatever `render` says.

mod error;
mod events;
mod render;
mod view;

pub use error::CoreError;
pub use events::{SubscriptionId, Subscribers, TabEvent};
pub use render::Rendering;
pub use view::TabView;

// Re-export the component boundary
pub use folio_loader::{ChangeNotifier, ContentSource, FetchError, FixedDelaySource, LoadRuntime};
pub use folio_slots::{
    ActivationSet, ContentMode, LoadPhase, LoadState, Slot, SlotError, SlotId, SlotTable,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
