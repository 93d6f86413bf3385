//! Demo catalog payload
//!
//! The deferred tab loads a small catalog of fixed-size records; this is
//! the data that does not exist until the tab is first visited.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub color: String,
}

impl CatalogEntry {
    fn new(id: u32, name: &str, color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

pub type Catalog = Vec<CatalogEntry>;

/// The fruit catalog shown on the lazily loaded tab
pub fn demo_catalog() -> Catalog {
    vec![
        CatalogEntry::new(1, "Apple", "Red"),
        CatalogEntry::new(2, "Banana", "Yellow"),
        CatalogEntry::new(3, "Orange", "Orange"),
        CatalogEntry::new(4, "Grape", "Purple"),
        CatalogEntry::new(5, "Strawberry", "Red"),
        CatalogEntry::new(6, "Watermelon", "Green"),
        CatalogEntry::new(7, "Melon", "Orange"),
        CatalogEntry::new(8, "Kiwi", "Green"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = demo_catalog();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.iter().all(|entry| !entry.name.is_empty()));
    }
}
