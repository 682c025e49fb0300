pub mod cache;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod route;
pub mod service;

pub use cache::{CachedRoute, RouteCache, TripKey};
pub use error::RoutingError;
pub use geocode::resolve_place;
pub use provider::{LocalOrsProvider, RemoteOrsProvider};
pub use route::{plan_trip, RoutePlan, RouteSummary};
pub use service::RoutingProvider;
