//! Marker clicks: link the session origin to whichever marker was picked.

use crate::geo::GeoPoint;
use crate::map::{MapSurface, MarkerHandle};

/// Draws a line from the user's origin to a clicked marker.
///
/// Holds no per-click state. Every qualifying click adds another line and
/// the surface keeps them all; clicking the same marker twice leaves two
/// lines.
#[derive(Debug, Clone, Copy)]
pub struct OriginLinker {
    origin: Option<GeoPoint>,
}

impl OriginLinker {
    pub fn new(origin: Option<GeoPoint>) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin
    }

    /// Handle a click. True means the click was consumed (a line was drawn)
    /// and the engine should skip its default behavior; false hands the
    /// click back to the engine.
    pub fn on_marker_click(&self, marker: &MarkerHandle, map: &mut dyn MapSurface) -> bool {
        match self.origin {
            Some(origin) => {
                map.add_polyline(vec![origin, marker.position]);
                true
            }
            None => false,
        }
    }
}
