//! ASCII rendering of a recorded surface.
//!
//! Plate carrée: longitude maps straight to columns, latitude to rows.
//! Cities draw as `*`, the user as `@`, polylines as `.` trails. Meant for
//! stderr next to the JSON report, the way a timeline sketch accompanies
//! machine output.

use super::headless::HeadlessMap;
use super::MarkerSource;
use crate::geo::GeoPoint;

const WIDTH: usize = 72;
const HEIGHT: usize = 24;

fn cell_of(p: GeoPoint) -> (usize, usize) {
    let col = (p.lon + 180.0) / 360.0 * (WIDTH as f64 - 1.0);
    let row = (90.0 - p.lat) / 180.0 * (HEIGHT as f64 - 1.0);
    (
        row.clamp(0.0, HEIGHT as f64 - 1.0).round() as usize,
        col.clamp(0.0, WIDTH as f64 - 1.0).round() as usize,
    )
}

fn plot_segment(cells: &mut [Vec<char>], a: GeoPoint, b: GeoPoint) {
    let (r0, c0) = cell_of(a);
    let (r1, c1) = cell_of(b);
    let dr = r1 as i64 - r0 as i64;
    let dc = c1 as i64 - c0 as i64;
    let steps = dr.abs().max(dc.abs());
    for i in 0..=steps {
        let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
        let r = (r0 as f64 + dr as f64 * t).round() as usize;
        let c = (c0 as f64 + dc as f64 * t).round() as usize;
        if r < HEIGHT && c < WIDTH {
            cells[r][c] = '.';
        }
    }
}

/// Render the surface as a framed character grid with a marker legend.
pub fn render_ascii_map(map: &HeadlessMap) -> String {
    let mut cells = vec![vec![' '; WIDTH]; HEIGHT];

    // Lines first; markers draw over them.
    for line in &map.polylines {
        for pair in line.points.windows(2) {
            plot_segment(&mut cells, pair[0], pair[1]);
        }
    }
    for marker in &map.markers {
        let (r, c) = cell_of(marker.position);
        cells[r][c] = match marker.source {
            MarkerSource::City => '*',
            MarkerSource::SelfPosition => '@',
        };
    }

    let mut out = String::new();
    out.push_str("  ╔");
    out.push_str(&"═".repeat(WIDTH));
    out.push_str("╗\n");
    for row in &cells {
        out.push_str("  ║");
        out.extend(row.iter());
        out.push_str("║\n");
    }
    out.push_str("  ╚");
    out.push_str(&"═".repeat(WIDTH));
    out.push_str("╝\n");

    for marker in &map.markers {
        let glyph = match marker.source {
            MarkerSource::City => '*',
            MarkerSource::SelfPosition => '@',
        };
        out.push_str(&format!("  {} {} ({})\n", glyph, marker.title, marker.position));
    }
    if !map.polylines.is_empty() {
        out.push_str(&format!("  . {} line(s)\n", map.polylines.len()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSurface;

    #[test]
    fn test_render_lists_markers() {
        let mut map = HeadlessMap::new();
        map.add_marker(GeoPoint::new(35.6762, 139.6503), "Tokyo, Japan", MarkerSource::City);
        map.add_marker(GeoPoint::new(40.7128, -74.006), "Me", MarkerSource::SelfPosition);
        let art = render_ascii_map(&map);
        assert!(art.contains("* Tokyo, Japan"));
        assert!(art.contains("@ Me"));
        assert!(art.contains('╔'));
    }

    #[test]
    fn test_render_counts_lines() {
        let mut map = HeadlessMap::new();
        map.add_polyline(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0)]);
        let art = render_ascii_map(&map);
        assert!(art.contains("1 line(s)"));
        assert!(art.contains('.'));
    }

    #[test]
    fn test_extreme_coordinates_stay_on_grid() {
        let mut map = HeadlessMap::new();
        map.add_marker(GeoPoint::new(90.0, 180.0), "corner", MarkerSource::City);
        map.add_marker(GeoPoint::new(-90.0, -180.0), "other corner", MarkerSource::City);
        // Out of range entirely; the raster clamps, the data does not.
        map.add_marker(GeoPoint::new(1234.0, -999.0), "weird", MarkerSource::City);
        let art = render_ascii_map(&map);
        assert!(art.contains("weird"));
    }

    #[test]
    fn test_zero_length_segment() {
        let mut map = HeadlessMap::new();
        let p = GeoPoint::new(5.0, 5.0);
        map.add_polyline(vec![p, p]);
        let art = render_ascii_map(&map);
        assert!(art.contains("1 line(s)"));
    }
}
