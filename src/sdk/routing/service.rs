use super::error::RoutingError;
use super::route::RoutePlan;
use crate::sdk::polyline::Coordinate;

pub trait RoutingProvider: Send + Sync {
    /// Geocodes a place name to a coordinate.
    fn geocode(&self, place: &str) -> Result<Coordinate, RoutingError>;

    /// Fetches the driving route from pickup to drop, geometry included.
    fn get_route(&self, pickup: Coordinate, drop: Coordinate) -> Result<RoutePlan, RoutingError>;
}
