pub mod sdk;

pub use sdk::config::OrsConfig;
pub use sdk::polyline::{
    decode, decode_strict, decode_with, encode, Coordinate, CoordinateSequence, DecodeOptions,
    PolylineError,
};
pub use sdk::rides::{quote_all, RideQuote, VehicleClass};
pub use sdk::routing::{plan_trip, RouteCache, RoutePlan, RouteSummary, RoutingError, RoutingProvider};
