use super::cache::{CachedRoute, RouteCache, TripKey};
use super::error::RoutingError;
use super::geocode::resolve_place;
use super::service::RoutingProvider;
use crate::sdk::polyline::{self, Coordinate, CoordinateSequence};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_hours: f64,
}

/// A route ready for rendering: totals plus decoded geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub summary: RouteSummary,
    pub geometry: CoordinateSequence,
    /// The provider's polyline, kept for caching.
    #[serde(skip)]
    pub encoded: String,
}

impl RoutePlan {
    /// Zero-length route used when pickup and drop coincide.
    pub fn stationary(at: Coordinate) -> Self {
        let geometry = vec![at];
        Self {
            summary: RouteSummary {
                distance_km: 0.0,
                duration_hours: 0.0,
            },
            encoded: polyline::encode(&geometry),
            geometry,
        }
    }
}

/// Resolves both places and fetches the route, consulting `cache` at each step.
pub fn plan_trip(
    pickup: &str,
    drop: &str,
    provider: &dyn RoutingProvider,
    cache: &mut RouteCache,
) -> Result<RoutePlan, RoutingError> {
    let key = TripKey::new(pickup, drop);
    if let Some(cached) = cache.get_route(&key) {
        log::debug!("[CACHE HIT] {}", key);
        return Ok(cached.to_plan());
    }
    log::debug!("[CACHE MISS] {}", key);

    let start = resolve_place(pickup, provider, cache)?;
    let end = resolve_place(drop, provider, cache)?;

    let plan = if start == end {
        log::debug!("Pickup and drop are identical. Returning zero route.");
        RoutePlan::stationary(start)
    } else {
        provider.get_route(start, end)?
    };

    log::info!(
        "Route {} -> {}: {:.1} km, {:.0} min, {} points",
        pickup,
        drop,
        plan.summary.distance_km,
        plan.summary.duration_hours * 60.0,
        plan.geometry.len()
    );

    cache.insert_route(key, CachedRoute::from(&plan));
    Ok(plan)
}
