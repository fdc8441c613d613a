//! Position providers: manual coordinates, IP-derived lookup, and the
//! passive store.
//!
//! Providers answer from whatever they already hold. None of them blocks on
//! acquiring a fresh fix, and none of them raises: an unavailable, denied,
//! or unreachable source is simply an empty answer.

use super::cache::FixStore;
use super::types::{Fix, FixSource, ProviderError};
use crate::geo::GeoPoint;
use serde::Deserialize;
use std::time::Duration;

/// A source of last-known position fixes.
pub trait FixProvider {
    /// Short name for banners and reports.
    fn name(&self) -> &'static str;

    /// The provider's cached fix, if it has one.
    fn last_known_fix(&self) -> Option<Fix>;
}

// ─── Manual coordinates ─────────────────────────────────────────

/// Coordinates supplied up front (flags or host configuration). The most
/// accurate source a terminal host has, so it sits first in the cascade.
pub struct ManualProvider {
    point: GeoPoint,
}

impl ManualProvider {
    pub fn new(point: GeoPoint) -> Self {
        Self { point }
    }
}

impl FixProvider for ManualProvider {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn last_known_fix(&self) -> Option<Fix> {
        Some(Fix::new(self.point, FixSource::Manual))
    }
}

// ─── IP-based lookup ────────────────────────────────────────────

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Network-derived position via the ipapi.co endpoint.
pub struct IpProvider {
    offline: bool,
}

impl IpProvider {
    pub fn new() -> Self {
        Self { offline: false }
    }

    /// Offline mode: answer empty without touching the network.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    fn query(&self) -> Result<Fix, ProviderError> {
        let response = ureq::get("https://ipapi.co/json/")
            .set("User-Agent", "cityfinder/0.3")
            .timeout(Duration::from_secs(3))
            .call()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let r: IpApiResult = response
            .into_json()
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let lat = r
            .latitude
            .ok_or_else(|| ProviderError::InvalidResponse("no latitude".into()))?;
        let lon = r
            .longitude
            .ok_or_else(|| ProviderError::InvalidResponse("no longitude".into()))?;

        Ok(Fix::new(GeoPoint::new(lat, lon), FixSource::Network))
    }
}

impl Default for IpProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixProvider for IpProvider {
    fn name(&self) -> &'static str {
        "network"
    }

    fn last_known_fix(&self) -> Option<Fix> {
        if self.offline {
            return None;
        }
        self.query().ok()
    }
}

// ─── Passive store ──────────────────────────────────────────────

/// Fixes recorded by earlier sessions, consumed without an active request.
pub struct PassiveProvider {
    store: FixStore,
}

impl PassiveProvider {
    pub fn new() -> Self {
        Self {
            store: FixStore::open(),
        }
    }

    /// Back the provider with a specific store (for testing).
    pub fn with_store(store: FixStore) -> Self {
        Self { store }
    }
}

impl Default for PassiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FixProvider for PassiveProvider {
    fn name(&self) -> &'static str {
        "passive"
    }

    fn last_known_fix(&self) -> Option<Fix> {
        self.store.last()
    }
}
