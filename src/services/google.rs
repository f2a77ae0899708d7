use crate::models::{Coordinates, GeocodedLocation, NearbyPlace, PlaceDetails, RawReview};
use crate::services::providers::{Geocoder, MapsError, PlaceDetailsProvider, PlacesSearch};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Google Maps web services client
///
/// Implements all three provider traits:
/// - Geocoding API for location lookup
/// - Places nearby search for candidate discovery
/// - Places details for contact data and reviews
#[derive(Clone)]
pub struct GoogleMapsClient {
    base_url: String,
    api_key: SecretString,
    client: Client,
}

impl GoogleMapsClient {
    /// Create a new client with a per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, MapsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a Maps endpoint and decode its JSON envelope
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, MapsError> {
        let url = format!("{}{}", self.base_url, path);

        // The key is never logged
        tracing::debug!("Calling maps provider: {} {:?}", path, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(256).collect();
            tracing::error!("Maps provider returned {} for {}: {}", status, path, snippet);
            return Err(MapsError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| MapsError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Fail on any provider status other than `OK` or `ZERO_RESULTS`
fn check_status(status: &str, error_message: Option<String>) -> Result<(), MapsError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(MapsError::ApiError {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

impl From<LatLng> for Coordinates {
    fn from(value: LatLng) -> Self {
        Coordinates::new(value.lat, value.lng)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct NearbyEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: Option<String>,
    name: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResult {
    name: Option<String>,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    website: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    reviews: Vec<ReviewResult>,
}

#[derive(Debug, Deserialize)]
struct ReviewResult {
    text: Option<String>,
    author_name: Option<String>,
    rating: Option<f64>,
}

/// Convert one nearby-search hit, keeping whatever survives a malformed payload
fn parse_nearby(value: Value) -> NearbyPlace {
    match serde_json::from_value::<NearbyResult>(value.clone()) {
        Ok(result) => NearbyPlace {
            place_id: result.place_id,
            name: result.name,
            coordinates: result.geometry.map(|g| g.location.into()),
            rating: result.rating,
        },
        Err(e) => {
            tracing::debug!("Malformed nearby search result: {}", e);
            NearbyPlace {
                place_id: value
                    .get("place_id")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                ..NearbyPlace::default()
            }
        }
    }
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>, MapsError> {
        let envelope: GeocodeEnvelope = self
            .get_json("/maps/api/geocode/json", &[("address", query)])
            .await?;

        check_status(&envelope.status, envelope.error_message)?;

        Ok(envelope.results.into_iter().next().map(|result| GeocodedLocation {
            coordinates: result.geometry.location.into(),
            formatted_address: result.formatted_address,
        }))
    }
}

#[async_trait]
impl PlacesSearch for GoogleMapsClient {
    async fn nearby_search(
        &self,
        center: Coordinates,
        radius_meters: u32,
        place_type: &str,
    ) -> Result<Vec<NearbyPlace>, MapsError> {
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_meters.to_string();

        let envelope: NearbyEnvelope = self
            .get_json(
                "/maps/api/place/nearbysearch/json",
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("type", place_type),
                ],
            )
            .await?;

        check_status(&envelope.status, envelope.error_message)?;

        let places: Vec<NearbyPlace> = envelope.results.into_iter().map(parse_nearby).collect();
        tracing::debug!("Nearby search returned {} places", places.len());

        Ok(places)
    }
}

#[async_trait]
impl PlaceDetailsProvider for GoogleMapsClient {
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, MapsError> {
        let fields = fields.join(",");

        let envelope: DetailsEnvelope = self
            .get_json(
                "/maps/api/place/details/json",
                &[("place_id", place_id), ("fields", fields.as_str())],
            )
            .await?;

        check_status(&envelope.status, envelope.error_message)?;

        let result = envelope.result.unwrap_or_default();

        Ok(PlaceDetails {
            name: result.name,
            address: result.formatted_address,
            phone: result.formatted_phone_number,
            website: result.website,
            rating: result.rating,
            reviews: result
                .reviews
                .into_iter()
                .map(|review| RawReview {
                    text: review.text.unwrap_or_default(),
                    author_name: review.author_name,
                    rating: review.rating,
                })
                .collect(),
        })
    }
}
