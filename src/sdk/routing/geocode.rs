use super::cache::RouteCache;
use super::error::RoutingError;
use super::service::RoutingProvider;
use crate::sdk::polyline::Coordinate;

/// Turns a pickup/drop string into a coordinate.
///
/// `"lat,lng"` is taken literally; anything else is geocoded through the
/// provider, cache first.
pub fn resolve_place(
    place: &str,
    provider: &dyn RoutingProvider,
    cache: &mut RouteCache,
) -> Result<Coordinate, RoutingError> {
    let place = place.trim();
    if let Ok(coord) = place.parse::<Coordinate>() {
        return Ok(coord);
    }

    if let Some(coord) = cache.get_geocode(place) {
        log::debug!("[CACHE HIT] geocode \"{}\"", place);
        return Ok(coord);
    }

    let coord = provider.geocode(place)?;
    log::debug!("Geocoded \"{}\" to {}", place, coord);
    cache.insert_geocode(place, coord);
    Ok(coord)
}
