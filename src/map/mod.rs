//! The map surface seam: what the viewer core asks of a rendering engine,
//! and the events the engine delivers back.
//!
//! A surface renders markers and polylines; everything else about the engine
//! (tiles, camera, gestures) is its own business. Engines talk back through
//! [`MapEvent`]s delivered in order on the host's event loop.

pub mod ascii;
pub mod headless;

use crate::geo::GeoPoint;
use serde::Serialize;

pub use headless::HeadlessMap;

/// Whether a marker stands for a dataset city or for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerSource {
    City,
    SelfPosition,
}

/// A rendered marker as handed back by the surface.
///
/// Carries everything a click handler needs; the core keeps no marker table
/// of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerHandle {
    pub id: usize,
    pub title: String,
    pub position: GeoPoint,
    pub source: MarkerSource,
}

/// Engine-side happenings.
///
/// `Ready` fires once when the map object exists but before its first layout
/// pass; `LaidOut` fires once after that pass, when operations depending on
/// viewport geometry become safe. Clicks can only follow `LaidOut`.
#[derive(Debug, Clone)]
pub enum MapEvent {
    Ready,
    LaidOut,
    MarkerClick(MarkerHandle),
}

/// Operations the viewer core consumes from a map engine.
pub trait MapSurface {
    /// Render a marker and return its handle.
    fn add_marker(&mut self, position: GeoPoint, title: &str, source: MarkerSource) -> MarkerHandle;

    /// Render a straight polyline through `points` in order.
    fn add_polyline(&mut self, points: Vec<GeoPoint>);
}
