//! Recording map surface.
//!
//! Keeps markers and polylines in insertion order and never removes either.
//! Stands in for a real engine in the CLI and in tests; its recorded state
//! doubles as the machine-readable session report.

use super::{MapSurface, MarkerHandle, MarkerSource};
use crate::geo::GeoPoint;
use serde::Serialize;

/// A rendered polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<GeoPoint>,
}

/// A surface that remembers everything drawn on it.
#[derive(Debug, Default, Serialize)]
pub struct HeadlessMap {
    pub markers: Vec<MarkerHandle>,
    pub polylines: Vec<Polyline>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first marker with this title, in insertion order.
    pub fn marker_by_title(&self, title: &str) -> Option<&MarkerHandle> {
        self.markers.iter().find(|m| m.title == title)
    }
}

impl MapSurface for HeadlessMap {
    fn add_marker(&mut self, position: GeoPoint, title: &str, source: MarkerSource) -> MarkerHandle {
        let handle = MarkerHandle {
            id: self.markers.len(),
            title: title.to_string(),
            position,
            source,
        };
        self.markers.push(handle.clone());
        handle
    }

    fn add_polyline(&mut self, points: Vec<GeoPoint>) {
        self.polylines.push(Polyline { points });
    }
}
