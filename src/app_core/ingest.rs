//! Shared ingestion helpers for turning the fetched payload into a catalog.
//!
//! This module is synchronous and has no runtime-specific dependencies.
//! Runtimes wrap these helpers with their own progress reporting
//! (native: a blocking download loop; web: an awaited fetch).

use crate::model::{CatalogResponse, Item, RawItem};
use anyhow::{Context, Result};
use foldhash::HashSet;
use tracing::{info, warn};

/// Collection endpoint queried once at startup.
pub const DEFAULT_ENDPOINT: &str = "https://amiiboapi.com/api/amiibo/";

/// Outcome of ingesting the raw entries.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    /// Accepted items in payload order.
    pub items: Vec<Item>,
    /// Entries dropped because `head` or `tail` was blank.
    pub rejected: usize,
    /// Entries dropped because their id was already taken by an earlier entry.
    pub duplicates: usize,
}

impl CatalogLoad {
    pub fn skipped(&self) -> usize {
        self.rejected + self.duplicates
    }
}

/// Parses the body of the collection endpoint.
pub fn parse_catalog(body: &str) -> Result<CatalogResponse> {
    serde_json::from_str(body).context("failed to parse amiibo catalog")
}

/// Validates raw entries and builds the catalog, keeping payload order.
///
/// `on_progress` receives a value in `[0.0, 1.0]` every 200 entries and at the end.
pub fn build_catalog<F>(raw: Vec<RawItem>, mut on_progress: F) -> CatalogLoad
where
    F: FnMut(f64),
{
    let total = raw.len();
    let mut load = CatalogLoad {
        items: Vec::with_capacity(total),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::default();

    for (idx, entry) in raw.into_iter().enumerate() {
        let name = entry.name.clone();
        match Item::from_raw(entry) {
            Some(item) => {
                if seen.insert(item.id.as_str().to_string()) {
                    load.items.push(item);
                } else {
                    warn!(id = %item.id, name = %item.name, "dropping duplicate catalog entry");
                    load.duplicates += 1;
                }
            }
            None => {
                warn!(%name, "dropping catalog entry without head/tail");
                load.rejected += 1;
            }
        }

        if total > 0 && (idx % 200 == 0 || idx + 1 == total) {
            on_progress((idx + 1) as f64 / total as f64);
        }
    }

    info!(
        items = load.items.len(),
        rejected = load.rejected,
        duplicates = load.duplicates,
        "catalog ingested"
    );
    load
}

/// Converts a download progress value into a `[0.0, 1.0]` ratio.
///
/// When total size is unknown, uses a hyperbolic curve that approaches 1.0
/// as `downloaded` grows.
pub fn progress_ratio(downloaded: u64, total: Option<u64>) -> f64 {
    if let Some(t) = total
        && t > 0
    {
        return (downloaded as f64 / t as f64).min(1.0);
    }

    let d = downloaded as f64;
    d / (d + 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(head: &str, tail: &str, name: &str) -> RawItem {
        RawItem {
            head: head.to_string(),
            tail: tail.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_catalog_keeps_order_and_drops_invalid() {
        let entries = vec![
            raw("00", "01", "Mario"),
            raw("", "02", "Headless"),
            raw("00", "02", "Luigi"),
            raw("0", "001", "Mario again"),
        ];
        let mut last_ratio = 0.0;
        let load = build_catalog(entries, |ratio| last_ratio = ratio);

        let names: Vec<&str> = load.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Mario", "Luigi"]);
        assert_eq!(load.rejected, 1);
        assert_eq!(load.duplicates, 1);
        assert_eq!(load.skipped(), 2);
        assert_eq!(last_ratio, 1.0);
    }

    #[test]
    fn test_parse_catalog() {
        let body = json!({
            "amiibo": [
                {"head": "00000000", "tail": "00000002", "name": "Mario", "type": "Figure"}
            ]
        })
        .to_string();
        let response = parse_catalog(&body).unwrap();
        assert_eq!(response.amiibo.len(), 1);
        assert_eq!(response.amiibo[0].item_type, "Figure");

        assert!(parse_catalog("<html>502</html>").is_err());
        assert!(parse_catalog(r#"{"code": 404}"#).unwrap().amiibo.is_empty());
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(progress_ratio(50, Some(100)), 0.5);
        assert_eq!(progress_ratio(150, Some(100)), 1.0);
        let unknown = progress_ratio(1_000_000, None);
        assert!((unknown - 0.5).abs() < f64::EPSILON);
        assert_eq!(progress_ratio(0, Some(0)), 0.0);
    }
}
