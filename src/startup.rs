//! Startup sequencing.
//!
//! The map engine reaches readiness in two phases: the map object arrives
//! first, its initial layout pass completes later. Everything that depends
//! on viewport geometry waits for the second. Once laid out, startup is a
//! single linear routine: place one marker per city record, install the
//! click route, settle the user's position, and either place the self
//! marker or tell the user why not.

use crate::dataset::{CityRecord, DatasetError, DatasetSource};
use crate::interact::OriginLinker;
use crate::location::{Fix, LocationResolver};
use crate::map::{MapEvent, MapSurface, MarkerHandle, MarkerSource};
use crate::notify::{NoticeDuration, Notifier};
use serde::Serialize;

/// Title of the marker standing for the user.
pub const SELF_MARKER_TITLE: &str = "Me";

/// Notice shown when no provider can place the user.
pub const LOCATION_UNAVAILABLE: &str =
    "Unable to access your location. Consider enabling Location services in your device's settings.";

/// Where the session stands in the engine's readiness handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Surface requested; the map object has not arrived.
    Created,
    /// Map object delivered; first layout pass still pending.
    Ready,
    /// Laid out. Markers are placed and clicks are routed.
    Live,
}

/// Drives startup in a fixed order and routes clicks afterwards.
///
/// Owns the dataset source and the resolver only until layout completes;
/// both are consumed by the startup routine, so neither loading nor
/// resolution can happen twice in a session.
pub struct StartupSequencer {
    phase: Phase,
    source: Option<DatasetSource>,
    resolver: Option<LocationResolver>,
    linker: Option<OriginLinker>,
    origin: Option<Fix>,
    records: Vec<CityRecord>,
}

impl StartupSequencer {
    pub fn new(source: DatasetSource, resolver: LocationResolver) -> Self {
        Self {
            phase: Phase::Created,
            source: Some(source),
            resolver: Some(resolver),
            linker: None,
            origin: None,
            records: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The user's position as settled during layout. Not re-queried once
    /// resolved or confirmed absent.
    pub fn origin(&self) -> Option<Fix> {
        self.origin
    }

    /// The records loaded during layout, in dataset order.
    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    /// The map object arrived; layout has not run yet.
    pub fn on_map_ready(&mut self) {
        if self.phase == Phase::Created {
            self.phase = Phase::Ready;
        }
    }

    /// The first layout pass completed. Runs the startup routine: city
    /// markers in dataset order, then the click route, then the position.
    ///
    /// A dataset that cannot be read or parsed is unrecoverable and comes
    /// back as the error; the host reports it. Layout events in any other
    /// phase are engine noise and do nothing.
    pub fn on_map_laid_out(
        &mut self,
        map: &mut dyn MapSurface,
        notifier: &mut dyn Notifier,
    ) -> Result<(), DatasetError> {
        if self.phase != Phase::Ready {
            return Ok(());
        }
        let source = match self.source.take() {
            Some(source) => source,
            None => return Ok(()),
        };

        let records = source.load()?;
        for record in &records {
            map.add_marker(record.location, &record.label, MarkerSource::City);
        }
        self.records = records;

        let origin = self.resolver.take().and_then(|r| r.resolve());

        // The click route goes in before the self marker exists, so the
        // self marker is clickable like any other.
        self.linker = Some(OriginLinker::new(origin.map(|fix| fix.point)));
        match origin {
            Some(fix) => {
                map.add_marker(fix.point, SELF_MARKER_TITLE, MarkerSource::SelfPosition);
            }
            None => notifier.notify(NoticeDuration::Long, LOCATION_UNAVAILABLE),
        }

        self.origin = origin;
        self.phase = Phase::Live;
        Ok(())
    }

    /// A marker was clicked. Returns the engine's "consumed" flag: true
    /// suppresses the engine's default click behavior.
    pub fn on_marker_click(&self, marker: &MarkerHandle, map: &mut dyn MapSurface) -> bool {
        match (self.phase, &self.linker) {
            (Phase::Live, Some(linker)) => linker.on_marker_click(marker, map),
            _ => false,
        }
    }

    /// Feed one engine event through the sequencer. Returns the consumed
    /// flag for clicks, false for the readiness events.
    pub fn dispatch(
        &mut self,
        event: MapEvent,
        map: &mut dyn MapSurface,
        notifier: &mut dyn Notifier,
    ) -> Result<bool, DatasetError> {
        match event {
            MapEvent::Ready => {
                self.on_map_ready();
                Ok(false)
            }
            MapEvent::LaidOut => {
                self.on_map_laid_out(map, notifier)?;
                Ok(false)
            }
            MapEvent::MarkerClick(handle) => Ok(self.on_marker_click(&handle, map)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::geo::GeoPoint;
    use crate::location::{FixProvider, FixSource};
    use crate::map::HeadlessMap;
    use crate::notify::RecordingNotifier;

    struct StubProvider(Option<Fix>);

    impl FixProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn last_known_fix(&self) -> Option<Fix> {
            self.0
        }
    }

    fn resolver_with(point: Option<GeoPoint>) -> LocationResolver {
        let fix = point.map(|p| Fix::at(p, FixSource::Manual, 0));
        LocationResolver::new(vec![Box::new(StubProvider(fix))])
    }

    fn tokyo_source() -> DatasetSource {
        DatasetSource::Inline(dataset::read_cities("Tokyo, Japan\n35.6762\n139.6503\n".as_bytes()).unwrap())
    }

    fn booted(
        source: DatasetSource,
        origin: Option<GeoPoint>,
    ) -> (StartupSequencer, HeadlessMap, RecordingNotifier) {
        let mut sequencer = StartupSequencer::new(source, resolver_with(origin));
        let mut map = HeadlessMap::new();
        let mut notifier = RecordingNotifier::new();
        sequencer.on_map_ready();
        sequencer.on_map_laid_out(&mut map, &mut notifier).unwrap();
        (sequencer, map, notifier)
    }

    const NYC: GeoPoint = GeoPoint {
        lat: 40.7128,
        lon: -74.006,
    };

    #[test]
    fn test_happy_path_with_location() {
        // Scenario: one city, a resolvable position.
        let (sequencer, map, notifier) = booted(tokyo_source(), Some(NYC));

        assert_eq!(sequencer.phase(), Phase::Live);
        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.markers[0].title, "Tokyo, Japan");
        assert_eq!(map.markers[0].source, MarkerSource::City);
        assert_eq!(map.markers[1].title, SELF_MARKER_TITLE);
        assert_eq!(map.markers[1].source, MarkerSource::SelfPosition);
        assert_eq!(map.markers[1].position, NYC);
        assert!(map.polylines.is_empty());
        assert!(notifier.notices.is_empty());
    }

    #[test]
    fn test_click_draws_origin_line() {
        let (sequencer, mut map, _) = booted(tokyo_source(), Some(NYC));
        let tokyo = map.marker_by_title("Tokyo, Japan").cloned().unwrap();

        assert!(sequencer.on_marker_click(&tokyo, &mut map));
        assert_eq!(map.polylines.len(), 1);
        assert_eq!(map.polylines[0].points, vec![NYC, tokyo.position]);
    }

    #[test]
    fn test_no_location_notifies_once_and_continues() {
        let (sequencer, mut map, notifier) = booted(tokyo_source(), None);

        assert_eq!(map.markers.len(), 1);
        assert!(map.marker_by_title(SELF_MARKER_TITLE).is_none());
        assert_eq!(notifier.notices.len(), 1);
        assert_eq!(notifier.notices[0].0, NoticeDuration::Long);
        assert_eq!(notifier.notices[0].1, LOCATION_UNAVAILABLE);

        // Clicks still work, just unconsumed and lineless.
        let tokyo = map.marker_by_title("Tokyo, Japan").cloned().unwrap();
        assert!(!sequencer.on_marker_click(&tokyo, &mut map));
        assert!(map.polylines.is_empty());
    }

    #[test]
    fn test_two_clicks_accumulate_two_lines() {
        let (mut sequencer, mut map, mut notifier) = booted(tokyo_source(), Some(NYC));
        let tokyo = map.marker_by_title("Tokyo, Japan").cloned().unwrap();

        for _ in 0..2 {
            let consumed = sequencer
                .dispatch(MapEvent::MarkerClick(tokyo.clone()), &mut map, &mut notifier)
                .unwrap();
            assert!(consumed);
        }
        assert_eq!(map.polylines.len(), 2);
        assert_eq!(map.polylines[0], map.polylines[1]);
    }

    #[test]
    fn test_empty_dataset_with_location() {
        let (_, map, notifier) = booted(DatasetSource::Inline(Vec::new()), Some(GeoPoint::new(0.0, 0.0)));

        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].title, SELF_MARKER_TITLE);
        assert!(notifier.notices.is_empty());
    }

    #[test]
    fn test_trailing_partial_record_dropped() {
        let source = DatasetSource::Inline(
            dataset::read_cities("Paris, France\n48.8566\n2.3522\nOrphan\n".as_bytes()).unwrap(),
        );
        let (_, map, _) = booted(source, Some(NYC));

        assert!(map.marker_by_title("Paris, France").is_some());
        assert!(map.marker_by_title("Orphan").is_none());
    }

    #[test]
    fn test_marker_order_matches_dataset_order() {
        let source = DatasetSource::Inline(
            dataset::read_cities("B\n2\n2\nA\n1\n1\nB\n2\n2\n".as_bytes()).unwrap(),
        );
        let (sequencer, map, _) = booted(source, None);

        let titles: Vec<&str> = map.markers.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "B"]);
        assert_eq!(sequencer.records().len(), 3);
    }

    #[test]
    fn test_self_marker_is_clickable() {
        let (sequencer, mut map, _) = booted(tokyo_source(), Some(NYC));
        let me = map.marker_by_title(SELF_MARKER_TITLE).cloned().unwrap();

        assert!(sequencer.on_marker_click(&me, &mut map));
        assert_eq!(map.polylines[0].points, vec![NYC, NYC]);
    }

    #[test]
    fn test_layout_before_ready_does_nothing() {
        let mut sequencer = StartupSequencer::new(tokyo_source(), resolver_with(None));
        let mut map = HeadlessMap::new();
        let mut notifier = RecordingNotifier::new();

        sequencer.on_map_laid_out(&mut map, &mut notifier).unwrap();
        assert_eq!(sequencer.phase(), Phase::Created);
        assert!(map.markers.is_empty());
        assert!(notifier.notices.is_empty());
    }

    #[test]
    fn test_repeated_layout_is_inert() {
        let (mut sequencer, mut map, mut notifier) = booted(tokyo_source(), Some(NYC));

        sequencer.on_map_laid_out(&mut map, &mut notifier).unwrap();
        assert_eq!(map.markers.len(), 2);
        assert_eq!(sequencer.phase(), Phase::Live);
    }

    #[test]
    fn test_click_before_layout_is_not_consumed() {
        let mut sequencer = StartupSequencer::new(tokyo_source(), resolver_with(Some(NYC)));
        let mut map = HeadlessMap::new();
        let stray = map.add_marker(GeoPoint::new(1.0, 1.0), "stray", MarkerSource::City);

        sequencer.on_map_ready();
        assert!(!sequencer.on_marker_click(&stray, &mut map));
        assert!(map.polylines.is_empty());
    }

    #[test]
    fn test_parse_failure_propagates() {
        let mut sequencer =
            StartupSequencer::new(DatasetSource::Path("/nope/missing.txt".into()), resolver_with(None));
        let mut map = HeadlessMap::new();
        let mut notifier = RecordingNotifier::new();

        sequencer.on_map_ready();
        let err = sequencer.on_map_laid_out(&mut map, &mut notifier).unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
        assert_ne!(sequencer.phase(), Phase::Live);
    }

    #[test]
    fn test_dispatch_drives_full_session() {
        let mut sequencer = StartupSequencer::new(tokyo_source(), resolver_with(Some(NYC)));
        let mut map = HeadlessMap::new();
        let mut notifier = RecordingNotifier::new();

        sequencer.dispatch(MapEvent::Ready, &mut map, &mut notifier).unwrap();
        sequencer.dispatch(MapEvent::LaidOut, &mut map, &mut notifier).unwrap();
        let tokyo = map.marker_by_title("Tokyo, Japan").cloned().unwrap();
        let consumed = sequencer
            .dispatch(MapEvent::MarkerClick(tokyo), &mut map, &mut notifier)
            .unwrap();

        assert!(consumed);
        assert_eq!(sequencer.origin().unwrap().point, NYC);
        assert_eq!(map.polylines.len(), 1);
    }
}
