use crate::sdk::polyline::{self, Coordinate};
use crate::sdk::routing::error::{OrsErrorPayload, RoutingError};
use crate::sdk::routing::route::{RoutePlan, RouteSummary};
use reqwest::StatusCode;
use serde::Deserialize;

// --- Data Structures for parsing directions and geocode responses ---

#[derive(Deserialize)]
pub struct GeoResponse {
    pub features: Vec<Feature>,
}
#[derive(Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}
#[derive(Deserialize)]
pub struct Geometry {
    /// GeoJSON order: `[lon, lat]`.
    pub coordinates: [f64; 2],
}

#[derive(Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// One route as returned by ORS (`summary` + `geometry`) or Google
/// (`legs` + `overview_polyline`).
#[derive(Deserialize, Default)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: Option<SummaryField>,
    #[serde(default)]
    pub geometry: Option<String>,
    #[serde(default)]
    pub overview_polyline: Option<OverviewPolyline>,
    #[serde(default)]
    pub legs: Vec<Leg>,
}
/// ORS sends a totals object, Google a road-name label such as `"I-80 W"`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SummaryField {
    Totals(DirectionsSummary),
    Label(String),
}
#[derive(Deserialize, Clone, Copy, Default)]
pub struct DirectionsSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}
#[derive(Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}
#[derive(Deserialize)]
pub struct Leg {
    pub distance: LegValue,
    pub duration: LegValue,
}
#[derive(Deserialize, Clone, Copy)]
pub struct LegValue {
    pub value: f64,
}

impl DirectionsRoute {
    pub fn encoded_geometry(&self) -> Option<&str> {
        self.geometry
            .as_deref()
            .or_else(|| self.overview_polyline.as_ref().map(|p| p.points.as_str()))
    }

    /// Metres and seconds, from the ORS summary or summed Google legs.
    pub fn totals(&self) -> DirectionsSummary {
        match self.summary {
            Some(SummaryField::Totals(summary)) => summary,
            Some(SummaryField::Label(_)) | None => {
                self.legs
                    .iter()
                    .fold(DirectionsSummary::default(), |acc, leg| DirectionsSummary {
                        distance: acc.distance + leg.distance.value,
                        duration: acc.duration + leg.duration.value,
                    })
            }
        }
    }

    pub fn into_plan(self) -> Result<RoutePlan, RoutingError> {
        let totals = self.totals();
        let encoded = self
            .encoded_geometry()
            .ok_or(RoutingError::MissingGeometry)?
            .to_string();

        Ok(RoutePlan {
            summary: RouteSummary {
                distance_km: totals.distance / 1000.0,
                duration_hours: totals.duration / 3600.0,
            },
            geometry: polyline::decode(&encoded),
            encoded,
        })
    }
}

impl GeoResponse {
    pub fn first_coordinate(&self) -> Option<Coordinate> {
        self.features
            .first()
            .map(|f| Coordinate::from_lon_lat(f.geometry.coordinates))
    }
}

/// Maps a non-success reply to `ApiError`/`UnroutablePoint`, or `RawApiError`
/// when the body is not an ORS error payload.
pub fn api_error(status: StatusCode, text: &str) -> RoutingError {
    // Try to parse the structured error first
    if let Ok(payload) = serde_json::from_str::<OrsErrorPayload>(text) {
        return payload.into();
    }
    log::error!(
        "API returned non-success status: {}. Unparseable Body: {}",
        status,
        text
    );
    RoutingError::RawApiError(text.to_string())
}

/// Turns a directions reply body into a plan, mapping ORS error payloads.
pub fn parse_directions(status: StatusCode, text: &str) -> Result<RoutePlan, RoutingError> {
    if !status.is_success() {
        return Err(api_error(status, text));
    }

    let response: DirectionsResponse = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse DirectionsResponse. Error: {}. Body: {}", e, text);
        e
    })?;

    response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::Generic("No route found in success response".to_string()))?
        .into_plan()
}

pub fn parse_geocode(
    place: &str,
    status: StatusCode,
    text: &str,
) -> Result<Coordinate, RoutingError> {
    if !status.is_success() {
        return Err(api_error(status, text));
    }

    let resp: GeoResponse = serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse GeoResponse. Error: {}. Body: {}", e, text);
        e
    })?;

    resp.first_coordinate()
        .ok_or_else(|| RoutingError::Generic(format!("No geocode results for place: {}", place)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORS_OK: &str = r#"{
        "routes": [{
            "summary": { "distance": 12500.0, "duration": 1800.0 },
            "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
            "bbox": [-126.453, 38.5, -120.2, 43.252]
        }]
    }"#;

    #[test]
    fn parses_ors_route() {
        let plan = parse_directions(StatusCode::OK, ORS_OK).unwrap();
        assert!((plan.summary.distance_km - 12.5).abs() < 1e-9);
        assert!((plan.summary.duration_hours - 0.5).abs() < 1e-9);
        assert_eq!(plan.geometry.len(), 3);
        assert_eq!(plan.encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn parses_google_overview_polyline() {
        let body = r#"{
            "status": "OK",
            "routes": [{
                "overview_polyline": { "points": "_p~iF~ps|U" },
                "legs": [
                    { "distance": { "value": 1000 }, "duration": { "value": 60 } },
                    { "distance": { "value": 500 }, "duration": { "value": 30 } }
                ]
            }]
        }"#;
        let plan = parse_directions(StatusCode::OK, body).unwrap();
        assert!((plan.summary.distance_km - 1.5).abs() < 1e-9);
        assert!((plan.summary.duration_hours - 90.0 / 3600.0).abs() < 1e-9);
        assert_eq!(plan.geometry, vec![Coordinate::new(38.5, -120.2)]);
    }

    #[test]
    fn google_summary_label_is_ignored_in_favour_of_legs() {
        let body = r#"{
            "status": "OK",
            "geocoded_waypoints": [],
            "routes": [{
                "summary": "A1 Kandy Road",
                "bounds": {
                    "northeast": { "lat": 7.2906, "lng": 80.6337 },
                    "southwest": { "lat": 6.9271, "lng": 79.8612 }
                },
                "copyrights": "Map data ©2024",
                "overview_polyline": { "points": "_p~iF~ps|U" },
                "legs": [{
                    "distance": { "text": "115 km", "value": 115000 },
                    "duration": { "text": "3 hours", "value": 10800 },
                    "start_address": "Kandy, Sri Lanka",
                    "end_address": "Colombo, Sri Lanka",
                    "steps": []
                }],
                "warnings": [],
                "waypoint_order": []
            }]
        }"#;
        let plan = parse_directions(StatusCode::OK, body).unwrap();
        assert!((plan.summary.distance_km - 115.0).abs() < 1e-9);
        assert!((plan.summary.duration_hours - 3.0).abs() < 1e-9);
        assert_eq!(plan.geometry, vec![Coordinate::new(38.5, -120.2)]);
    }

    #[test]
    fn maps_unroutable_error_code() {
        let body = r#"{"error":{"code":2010,"message":"Could not find routable point"}}"#;
        let err = parse_directions(StatusCode::NOT_FOUND, body).unwrap_err();
        assert!(matches!(err, RoutingError::UnroutablePoint));
    }

    #[test]
    fn maps_structured_api_error() {
        let body = r#"{"error":{"code":2004,"message":"Route too long"}}"#;
        match parse_directions(StatusCode::BAD_REQUEST, body).unwrap_err() {
            RoutingError::ApiError { code, message } => {
                assert_eq!(code, 2004);
                assert_eq!(message, "Route too long");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn keeps_unstructured_error_body() {
        let err = parse_directions(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert!(matches!(err, RoutingError::RawApiError(ref s) if s == "upstream down"));
    }

    #[test]
    fn success_without_routes_is_an_error() {
        let err = parse_directions(StatusCode::OK, r#"{"routes":[]}"#).unwrap_err();
        assert!(matches!(err, RoutingError::Generic(_)));
    }

    #[test]
    fn route_without_geometry_is_an_error() {
        let body = r#"{"routes":[{"summary":{"distance":1.0,"duration":1.0}}]}"#;
        let err = parse_directions(StatusCode::OK, body).unwrap_err();
        assert!(matches!(err, RoutingError::MissingGeometry));
    }

    #[test]
    fn geocode_swaps_lon_lat() {
        let body = r#"{"features":[{"geometry":{"coordinates":[80.6337,7.2906]}}]}"#;
        assert_eq!(
            parse_geocode("Kandy", StatusCode::OK, body).unwrap(),
            Coordinate::new(7.2906, 80.6337)
        );
        assert!(parse_geocode("Nowhere", StatusCode::OK, r#"{"features":[]}"#).is_err());
    }

    #[test]
    fn geocode_error_payload_becomes_api_error() {
        let body = r#"{"error":{"code":403,"message":"Quota exceeded"}}"#;
        match parse_geocode("Kandy", StatusCode::FORBIDDEN, body).unwrap_err() {
            RoutingError::ApiError { code, message } => {
                assert_eq!(code, 403);
                assert_eq!(message, "Quota exceeded");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn geocode_unstructured_error_keeps_body() {
        let body = r#"{"error":"Access to this API has been disallowed"}"#;
        let err = parse_geocode("Kandy", StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, RoutingError::RawApiError(ref s) if s == body));
    }
}
