use crate::models::{Coordinates, GeocodedLocation, NearbyPlace, PlaceDetails};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to a maps provider
#[derive(Debug, Error)]
pub enum MapsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Provider returned status {status}: {message}")]
    ApiError { status: String, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Resolves free-text locations to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the provider has no match for `query`
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>, MapsError>;
}

/// Finds places of a given type around a point
#[async_trait]
pub trait PlacesSearch: Send + Sync {
    async fn nearby_search(
        &self,
        center: Coordinates,
        radius_meters: u32,
        place_type: &str,
    ) -> Result<Vec<NearbyPlace>, MapsError>;
}

/// Fetches name, contact data and reviews for a single place
#[async_trait]
pub trait PlaceDetailsProvider: Send + Sync {
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, MapsError>;
}
