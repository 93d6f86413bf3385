//! Demo configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Simulated network latency for the catalog fetch, in milliseconds
    pub fetch_delay_ms: u64,
    /// Make the catalog fetch fail, to walk the error/retry path
    pub fail_fetch: bool,
    /// Dump the collected event trace as JSON before exiting
    pub dump_events: bool,
}

impl DemoConfig {
    /// Environment overrides: FOLIO_FETCH_DELAY_MS, FOLIO_FAIL_FETCH,
    /// FOLIO_DUMP_EVENTS
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(ms) = std::env::var("FOLIO_FETCH_DELAY_MS") {
            if let Ok(ms) = ms.parse() {
                config.fetch_delay_ms = ms;
            }
        }

        config.fail_fetch = env_flag("FOLIO_FAIL_FETCH");
        config.dump_events = env_flag("FOLIO_DUMP_EVENTS");

        config
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 1000,
            fail_fetch: false,
            dump_events: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DemoConfig::default();
        assert_eq!(config.fetch_delay(), Duration::from_millis(1000));
        assert!(!config.fail_fetch);
        assert!(!config.dump_events);
    }
}
