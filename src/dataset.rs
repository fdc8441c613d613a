//! The city dataset: labeled points read from a plain-text resource.
//!
//! An entry is three lines with no separator between entries:
//!
//! ```text
//! Tokyo, Japan
//! 35.6762
//! 139.6503
//! ```
//!
//! The label line is taken verbatim (commas and non-ASCII included). The two
//! coordinate lines must parse as decimal floating point. Reading stops when
//! the lines run out; a trailing label without both coordinate lines is
//! dropped rather than reported.

use crate::geo::GeoPoint;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// The default city list compiled into the binary.
const BUNDLED: &str = include_str!("../data/cities.txt");

/// One entry of the dataset: a display label and where it sits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRecord {
    pub label: String,
    pub location: GeoPoint,
}

/// Why a dataset could not be read.
#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    /// A coordinate line that does not parse as a decimal number.
    BadCoordinate { line: usize, value: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read city dataset: {}", e),
            Self::BadCoordinate { line, value } => {
                write!(f, "line {}: '{}' is not a coordinate", line, value)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::BadCoordinate { .. } => None,
        }
    }
}

/// Read city records from a line stream, in input order.
///
/// Duplicate labels and out-of-range coordinates pass through untouched;
/// the dataset is trusted for content, only its shape is checked.
pub fn read_cities<R: BufRead>(reader: R) -> Result<Vec<CityRecord>, DatasetError> {
    let mut records = Vec::new();
    let mut lines = reader.lines().enumerate();

    loop {
        let label = match lines.next() {
            Some((_, line)) => line.map_err(DatasetError::Io)?,
            None => break,
        };
        let lat = match lines.next() {
            Some((n, line)) => parse_coordinate(n, line.map_err(DatasetError::Io)?)?,
            None => break,
        };
        let lon = match lines.next() {
            Some((n, line)) => parse_coordinate(n, line.map_err(DatasetError::Io)?)?,
            None => break,
        };
        records.push(CityRecord {
            label,
            location: GeoPoint::new(lat, lon),
        });
    }

    Ok(records)
}

fn parse_coordinate(index: usize, raw: String) -> Result<f64, DatasetError> {
    raw.trim().parse::<f64>().map_err(|_| DatasetError::BadCoordinate {
        line: index + 1,
        value: raw,
    })
}

/// Read city records from a file on disk.
pub fn read_cities_path(path: impl AsRef<Path>) -> Result<Vec<CityRecord>, DatasetError> {
    let file = File::open(path).map_err(DatasetError::Io)?;
    read_cities(BufReader::new(file))
}

/// The compiled-in default list.
pub fn bundled() -> Result<Vec<CityRecord>, DatasetError> {
    read_cities(BUNDLED.as_bytes())
}

/// Where a session's city list comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// The list compiled into the binary.
    Bundled,
    /// A dataset file on disk.
    Path(PathBuf),
    /// Records handed over directly (embedding hosts, tests).
    Inline(Vec<CityRecord>),
}

impl DatasetSource {
    pub fn load(self) -> Result<Vec<CityRecord>, DatasetError> {
        match self {
            Self::Bundled => bundled(),
            Self::Path(path) => read_cities_path(path),
            Self::Inline(records) => Ok(records),
        }
    }
}
