use clap::Parser;
use std::path::PathBuf;
use std::process;

use cityfinder::dataset::DatasetSource;
use cityfinder::geo::GeoPoint;
use cityfinder::location::{
    FixProvider, FixStore, IpProvider, LocationResolver, ManualProvider, PassiveProvider,
};
use cityfinder::map::{ascii, HeadlessMap, MarkerHandle};
use cityfinder::notify::StderrNotifier;
use cityfinder::startup::StartupSequencer;

/// Cityfinder — city markers on a map, and a line from you to any city you
/// pick.
///
/// Loads the bundled city list (or a file of label/latitude/longitude line
/// triples), places one marker per city, then places you using the first
/// position source that answers: explicit coordinates, network lookup, or
/// the fix left behind by a previous run.
///
/// Examples:
///   cityfinder
///   cityfinder --cities data/cities.txt
///   cityfinder --lat 40.7128 --lon -74.0060 --click "Tokyo, Japan"
///   cityfinder --offline --click "Paris, France" --click "Paris, France"
#[derive(Parser)]
#[command(name = "cityfinder", version, about, long_about = None)]
struct Cli {
    /// City dataset file (label / latitude / longitude line triples).
    /// Defaults to the bundled list.
    #[arg(long)]
    cities: Option<PathBuf>,

    /// Your latitude (-90 to 90). Pairs with --lon.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Your longitude (-180 to 180). Pairs with --lat.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Skip the network lookup; use only explicit coordinates and the
    /// stored fix.
    #[arg(long)]
    offline: bool,

    /// Ignore every position source and run without an origin.
    #[arg(long)]
    no_location: bool,

    /// After startup, click the marker with this title (repeatable).
    #[arg(long)]
    click: Vec<String>,

    /// Skip the ASCII map on stderr.
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let source = match &cli.cities {
        Some(path) => DatasetSource::Path(path.clone()),
        None => DatasetSource::Bundled,
    };

    let mut sequencer = StartupSequencer::new(source, build_resolver(&cli));
    let mut map = HeadlessMap::new();
    let mut notifier = StderrNotifier;

    // The readiness handshake a real engine would drive.
    sequencer.on_map_ready();
    if let Err(e) = sequencer.on_map_laid_out(&mut map, &mut notifier) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    eprintln!("  {} cities on the map", sequencer.records().len());
    if let Some(fix) = sequencer.origin() {
        eprintln!("  Position: {} (via {})", fix.point, fix.source);
    }

    for title in &cli.click {
        let marker: MarkerHandle = match map.marker_by_title(title) {
            Some(handle) => handle.clone(),
            None => {
                eprintln!("Error: no marker titled '{}'", title);
                process::exit(1);
            }
        };
        let consumed = sequencer.on_marker_click(&marker, &mut map);
        let outcome = if consumed { "line drawn" } else { "not consumed" };
        eprintln!("  Click '{}': {}", title, outcome);
    }

    // Sketch to stderr, report to stdout.
    if !cli.quiet {
        eprint!("{}", ascii::render_ascii_map(&map));
    }
    println!("{}", serde_json::to_string_pretty(&map).unwrap());
}

/// Build the provider cascade from the flags: explicit coordinates first,
/// network second, the stored fix last.
fn build_resolver(cli: &Cli) -> LocationResolver {
    let mut providers: Vec<Box<dyn FixProvider>> = Vec::new();
    if cli.no_location {
        return LocationResolver::new(providers);
    }

    match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                eprintln!("Error: Invalid coordinates. Lat: -90..90, Lon: -180..180");
                process::exit(1);
            }
            providers.push(Box::new(ManualProvider::new(GeoPoint::new(lat, lon))));
        }
        (None, None) => {}
        _ => {
            eprintln!("Error: --lat and --lon go together.");
            process::exit(1);
        }
    }

    let mut ip = IpProvider::new();
    ip.set_offline(cli.offline);
    providers.push(Box::new(ip));
    providers.push(Box::new(PassiveProvider::new()));

    LocationResolver::new(providers).with_store(FixStore::open())
}
