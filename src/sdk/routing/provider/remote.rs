use super::types::{parse_directions, parse_geocode};
use super::{directions_body, DIRECTIONS_PATH, REQUEST_TIMEOUT};
use crate::sdk::polyline::Coordinate;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::route::RoutePlan;
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;

pub const ORS_BASE_URL: &str = "https://api.openrouteservice.org";

/// Hosted openrouteservice: keyed and rate limited.
pub struct RemoteOrsProvider {
    client: Client,
    api_key: String,
    base_url: String,
    limiter: Limiter,
}

impl RemoteOrsProvider {
    pub fn new(api_key: String, limiter: Limiter) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: ORS_BASE_URL.to_string(),
            limiter,
        })
    }
}

impl RoutingProvider for RemoteOrsProvider {
    fn geocode(&self, place: &str) -> Result<Coordinate, RoutingError> {
        rate_limit::wait(&self.limiter);
        let url = format!("{}/geocode/search", self.base_url);
        log::debug!("[PROVIDER] Calling remote geocode for place: \"{}\"", place);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("text", place), ("size", "1")])
            .send()?;
        let status = response.status();
        let text = response.text()?;

        parse_geocode(place, status, &text)
    }

    fn get_route(&self, pickup: Coordinate, drop: Coordinate) -> Result<RoutePlan, RoutingError> {
        rate_limit::wait(&self.limiter);
        log::debug!(
            "[PROVIDER] Calling remote get_route for {} -> {}",
            pickup,
            drop
        );
        let url = format!("{}{}", self.base_url, DIRECTIONS_PATH);
        let body = directions_body(pickup, drop);

        let response = match self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .json(&body)
            .send()
        {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nBody: {}\nError: {}",
                    url,
                    body,
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
