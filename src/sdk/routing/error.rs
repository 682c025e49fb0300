use crate::sdk::polyline::PolylineError;
use serde::Deserialize;
use thiserror::Error;

/// ORS code for "Could not find routable point within a radius".
pub const ORS_UNROUTABLE_CODE: u32 = 2010;

// Helper structs to parse the JSON error response from ORS
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    #[error("API Error (Code {code}): {message}")]
    ApiError { code: u32, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Route has no geometry")]
    MissingGeometry,

    #[error("Malformed route geometry: {0}")]
    Polyline(#[from] PolylineError),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl From<OrsErrorPayload> for RoutingError {
    fn from(payload: OrsErrorPayload) -> Self {
        if payload.error.code == ORS_UNROUTABLE_CODE {
            RoutingError::UnroutablePoint
        } else {
            RoutingError::ApiError {
                code: payload.error.code,
                message: payload.error.message,
            }
        }
    }
}
