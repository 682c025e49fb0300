pub mod local;
pub mod remote;
pub mod types;

pub use local::LocalOrsProvider;
pub use remote::RemoteOrsProvider;

use crate::sdk::polyline::Coordinate;
use serde_json::{json, Value};
use std::time::Duration;

pub(crate) const DIRECTIONS_PATH: &str = "/v2/directions/driving-car";
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// ORS directions request; the default JSON format carries an encoded polyline geometry.
pub(crate) fn directions_body(pickup: Coordinate, drop: Coordinate) -> Value {
    json!({
        "coordinates": [pickup.to_lon_lat(), drop.to_lon_lat()],
        "geometry": true,
        "instructions": false
    })
}
