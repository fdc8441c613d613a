//! Persisted last-known fix at ~/.cityfinder/last_fix.json.
//!
//! Written back after every successful resolution so a later session can
//! consume it passively. No TTL: a last-known fix counts regardless of age.
//! Reads never fail upward; a missing or corrupt file is the same as no fix.

use super::types::{Fix, FixSource};
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
struct StoredFix {
    lat: f64,
    lon: f64,
    timestamp: i64,
    #[serde(default)]
    source_name: Option<String>,
}

/// The on-disk fix store.
pub struct FixStore {
    path: PathBuf,
}

impl FixStore {
    /// Open the store at the default location (~/.cityfinder/last_fix.json).
    pub fn open() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Open a store at a specific path (for testing).
    pub fn open_at(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cityfinder")
            .join("last_fix.json")
    }

    /// The stored fix, if the file exists and parses.
    pub fn last(&self) -> Option<Fix> {
        let data = fs::read_to_string(&self.path).ok()?;
        let stored: StoredFix = serde_json::from_str(&data).ok()?;
        Some(Fix::at(
            GeoPoint::new(stored.lat, stored.lon),
            FixSource::Passive,
            stored.timestamp,
        ))
    }

    /// Persist a fix, best effort. Write failures are swallowed; losing the
    /// store only costs the next session its passive answer.
    pub fn record(&self, fix: &Fix) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let stored = StoredFix {
            lat: fix.point.lat,
            lon: fix.point.lon,
            timestamp: fix.timestamp_ms,
            source_name: Some(fix.source.to_string()),
        };
        if let Ok(json) = serde_json::to_string_pretty(&stored) {
            let _ = fs::write(&self.path, json);
        }
    }
}
