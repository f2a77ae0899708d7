use crate::models::domain::{GeocodedLocation, RankedGym};
use serde::{Deserialize, Serialize};

/// Liveness banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Response for the geocode endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub formatted_address: String,
}

impl From<GeocodedLocation> for LocationResponse {
    fn from(location: GeocodedLocation) -> Self {
        Self {
            latitude: location.coordinates.lat,
            longitude: location.coordinates.lng,
            formatted_address: location.formatted_address,
        }
    }
}

/// One ranked gym as returned by the recommendations endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymResponse {
    pub gym_name: String,
    pub tailored_rating: f64,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<RankedGym> for GymResponse {
    fn from(gym: RankedGym) -> Self {
        Self {
            gym_name: gym.name,
            tailored_rating: round_rating(gym.tailored_rating),
            address: gym.address,
            phone: gym.phone,
            website: gym.website,
            latitude: gym.coordinates.lat,
            longitude: gym.coordinates.lng,
        }
    }
}

/// Round to two decimals, half away from zero
#[inline]
pub fn round_rating(rating: f64) -> f64 {
    (rating * 100.0).round() / 100.0
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
