// Encoded polyline codec (Google "Encoded Polyline Algorithm Format")
pub mod decode;
pub mod encode;
pub mod error;

pub use decode::{decode, decode_strict, decode_with};
pub use encode::{encode, encode_with};
pub use error::PolylineError;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Precision used by Google and openrouteservice (1e-5 degrees).
pub const DEFAULT_PRECISION: u32 = 5;

/// Highest precision accepted; 10^10 still scales a degree value well inside i64.
pub const MAX_PRECISION: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Route geometry from origin to destination. Order is drawing order.
pub type CoordinateSequence = Vec<Coordinate>;

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// ORS wants `[lon, lat]` pairs in request bodies.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = String;

    /// Parses `"lat,lng"`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("Expected \"lat,lng\", got \"{}\"", s))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid latitude \"{}\": {}", lat.trim(), e))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid longitude \"{}\": {}", lng.trim(), e))?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(format!("Coordinate must be finite, got \"{}\"", s));
        }
        Ok(Self::new(latitude, longitude))
    }
}

/// Knobs for [`decode_with`] and [`decode_strict`].
///
/// In strict mode `max_points` is checked after each complete point, so an
/// input holding exactly `max_points` points plus a broken tail reports
/// `Truncated`, not `TooManyPoints`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub precision: u32,
    pub max_input_len: Option<usize>,
    pub max_points: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_input_len: None,
            max_points: None,
        }
    }
}

impl DecodeOptions {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = Some(max);
        self
    }

    pub fn with_max_points(mut self, max: usize) -> Self {
        self.max_points = Some(max);
        self
    }
}

pub(crate) fn scale_factor(precision: u32) -> f64 {
    10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX))
}
