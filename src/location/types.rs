//! Core types for the positioning subsystem.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which provider class produced a fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixSource {
    /// Coordinates supplied up front by the user or host.
    Manual,
    /// Derived from the network (IP lookup stands in for cell/wifi).
    Network,
    /// Left behind by an earlier session, consumed without a request.
    Passive,
}

impl fmt::Display for FixSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Network => write!(f, "network"),
            Self::Passive => write!(f, "passive"),
        }
    }
}

/// A last-known position: the point, its provenance, and when it was
/// observed (epoch milliseconds). Age is carried, never filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub point: GeoPoint,
    pub source: FixSource,
    pub timestamp_ms: i64,
}

impl Fix {
    /// A fix observed now.
    pub fn new(point: GeoPoint, source: FixSource) -> Self {
        Self::at(point, source, chrono::Utc::now().timestamp_millis())
    }

    /// A fix with an explicit observation time.
    pub fn at(point: GeoPoint, source: FixSource, timestamp_ms: i64) -> Self {
        Self {
            point,
            source,
            timestamp_ms,
        }
    }
}

/// Why a provider query produced nothing.
///
/// Diagnostic only: the resolver treats every variant as "no fix here" and
/// moves on to the next provider.
#[derive(Debug)]
pub enum ProviderError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "invalid provider response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_source_display() {
        assert_eq!(FixSource::Manual.to_string(), "manual");
        assert_eq!(FixSource::Network.to_string(), "network");
        assert_eq!(FixSource::Passive.to_string(), "passive");
    }

    #[test]
    fn test_fix_carries_timestamp() {
        let fix = Fix::at(GeoPoint::new(0.0, 0.0), FixSource::Passive, 12345);
        assert_eq!(fix.timestamp_ms, 12345);
    }

    #[test]
    fn test_provider_error_display() {
        let e = ProviderError::Network("timed out".into());
        assert_eq!(e.to_string(), "network error: timed out");
    }
}
