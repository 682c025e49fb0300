use super::types::{parse_directions, parse_geocode};
use super::{directions_body, DIRECTIONS_PATH, REQUEST_TIMEOUT};
use crate::sdk::polyline::Coordinate;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::RoutePlan;
use crate::sdk::routing::service::RoutingProvider;
use reqwest::blocking::Client;

/// Self-hosted ORS with a Pelias geocoder next to it. No key, no quota.
pub struct LocalOrsProvider {
    client: Client,
    base_url: String,
}

impl LocalOrsProvider {
    pub fn new(base_url: String) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
        })
    }
}

impl RoutingProvider for LocalOrsProvider {
    fn geocode(&self, place: &str) -> Result<Coordinate, RoutingError> {
        log::debug!("[PROVIDER] Calling local geocode for place: \"{}\"", place);
        let url = format!("{}/pelias/v1/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("text", place), ("size", "1")])
            .send()?;
        let status = response.status();
        let text = response.text()?;

        parse_geocode(place, status, &text)
    }

    fn get_route(&self, pickup: Coordinate, drop: Coordinate) -> Result<RoutePlan, RoutingError> {
        log::debug!(
            "[PROVIDER] Calling local get_route for {} -> {}",
            pickup,
            drop
        );
        let url = format!("{}{}", self.base_url, DIRECTIONS_PATH);
        let body = directions_body(pickup, drop);

        let response = match self.client.post(&url).json(&body).send() {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request to local ORS. URL: {}\nError: {}",
                    url,
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;
        parse_directions(status, &text)
    }
}
