//! FOLIO demo shell
//!
//! Replays the classic two-tab scenario on the terminal: the first tab is
//! static, the second lazily loads a catalog behind a simulated network
//! delay. Selection events stand in for taps; every event would be a
//! re-render on a real surface, so the shell counts them per slot.

mod catalog;
mod config;

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use folio_core::{
    init_logging, FetchError, FixedDelaySource, Rendering, Slot, SlotId, TabEvent, TabView,
};

use crate::catalog::{demo_catalog, Catalog};
use crate::config::DemoConfig;

const OVERVIEW: SlotId = SlotId(0);
const CATALOG: SlotId = SlotId(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = DemoConfig::from_env();
    tracing::info!(?config, "Starting FOLIO demo");

    let source: FixedDelaySource<Catalog> = {
        let source = FixedDelaySource::new(config.fetch_delay());
        if config.fail_fetch {
            source.with_failure(CATALOG, FetchError::Timeout)
        } else {
            source.with_payload(CATALOG, demo_catalog())
        }
    };

    let slots = vec![
        Slot::fixed(OVERVIEW, "Tab 1"),
        Slot::deferred(CATALOG, "Tab 2"),
    ];

    let view = TabView::new(slots, OVERVIEW, Arc::new(source))?;

    // The render surface's re-render signal, recorded per slot
    let trace: Arc<Mutex<Vec<TabEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&trace);
    view.subscribe(move |event| sink.lock().push(*event));

    // Initially only the first tab exists as far as content is concerned
    print_frame(&view, OVERVIEW)?;

    // First visit to the catalog tab kicks off the one and only fetch
    view.select_slot(CATALOG)?;
    print_frame(&view, CATALOG)?;

    tokio::time::sleep(config.fetch_delay() + config.fetch_delay() / 5).await;
    print_frame(&view, CATALOG)?;

    if config.fail_fetch {
        // Walk the retry path once; the simulated source fails again
        view.retry(CATALOG)?;
        print_frame(&view, CATALOG)?;
        tokio::time::sleep(config.fetch_delay() + config.fetch_delay() / 5).await;
        print_frame(&view, CATALOG)?;
    }

    // Round trip back and forth: no re-fetch, the content is simply there
    view.select_slot(OVERVIEW)?;
    print_frame(&view, OVERVIEW)?;
    view.select_slot(CATALOG)?;
    print_frame(&view, CATALOG)?;

    view.shutdown();

    let trace = trace.lock();
    summarize(&view, &trace);

    if config.dump_events {
        println!("{}", serde_json::to_string_pretty(&*trace)?);
    }

    Ok(())
}

/// Draw one frame for a slot, the way a real surface would after an event
fn print_frame(view: &TabView<Catalog>, slot: SlotId) -> anyhow::Result<()> {
    let title = view.slot(slot)?.title;

    println!("── [{}] ─────────────────────────", title);
    match view.render(slot)? {
        Rendering::Placeholder => {
            println!("  Simple static content.");
            println!("  Switch to Tab 2 to load the catalog on first visit.");
        }
        Rendering::LoadingIndicator => {
            println!("  Loading catalog…");
        }
        Rendering::Content(catalog) => {
            println!("  Catalog ({} entries):", catalog.len());
            for entry in &catalog {
                println!("    {:2}. {:<12} {}", entry.id, entry.name, entry.color);
            }
        }
        Rendering::ErrorView(error) => {
            println!("  Load failed: {}", error);
            println!("  (retry available)");
        }
    }
    println!();

    Ok(())
}

/// Per-slot event counts: on a real surface each event is a recomposition
fn summarize(view: &TabView<Catalog>, trace: &[TabEvent]) {
    let mut per_slot: HashMap<SlotId, usize> = HashMap::new();
    for event in trace {
        *per_slot.entry(event.slot()).or_default() += 1;
    }

    println!("── Event summary ────────────────");
    for slot in view.slots() {
        let count = per_slot.get(&slot.id).copied().unwrap_or(0);
        println!("  {}: {} event(s)", slot.title, count);
    }
}
