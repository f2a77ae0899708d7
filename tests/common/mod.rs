// Shared fakes for the maps provider traits
#![allow(dead_code)]

use async_trait::async_trait;
use fitfindr::models::{Coordinates, GeocodedLocation, NearbyPlace, PlaceDetails, RawReview};
use fitfindr::services::{Geocoder, MapsError, PlaceDetailsProvider, PlacesSearch};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const CENTRAL_PARK: &str = "Central Park, NY";

pub fn central_park() -> GeocodedLocation {
    GeocodedLocation {
        coordinates: Coordinates::new(40.7812, -73.9665),
        formatted_address: "Central Park, New York, NY, USA".to_string(),
    }
}

#[derive(Default)]
pub struct FakeGeocoder {
    pub known: HashMap<String, GeocodedLocation>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn central_park() -> Self {
        let mut known = HashMap::new();
        known.insert(CENTRAL_PARK.to_string(), central_park());
        Self {
            known,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MapsError::HttpStatus(503));
        }
        Ok(self.known.get(query).cloned())
    }
}

#[derive(Default)]
pub struct FakePlaces {
    pub places: Vec<NearbyPlace>,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<(Coordinates, u32, String)>>,
}

impl FakePlaces {
    pub fn with_places(places: Vec<NearbyPlace>) -> Self {
        Self {
            places,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(Coordinates, u32, String)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesSearch for FakePlaces {
    async fn nearby_search(
        &self,
        center: Coordinates,
        radius_meters: u32,
        place_type: &str,
    ) -> Result<Vec<NearbyPlace>, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((center, radius_meters, place_type.to_string()));
        if self.fail {
            return Err(MapsError::ApiError {
                status: "REQUEST_DENIED".to_string(),
                message: "The provided API key is invalid.".to_string(),
            });
        }
        Ok(self.places.clone())
    }
}

#[derive(Default)]
pub struct FakeDetails {
    pub details: HashMap<String, PlaceDetails>,
    pub failing: HashSet<String>,
    pub delays_ms: HashMap<String, u64>,
    pub calls: AtomicUsize,
    pub requested_fields: Mutex<Vec<String>>,
}

impl FakeDetails {
    pub fn insert(&mut self, place_id: &str, details: PlaceDetails) {
        self.details.insert(place_id.to_string(), details);
    }

    pub fn fail(&mut self, place_id: &str) {
        self.failing.insert(place_id.to_string());
    }

    pub fn delay(&mut self, place_id: &str, millis: u64) {
        self.delays_ms.insert(place_id.to_string(), millis);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceDetailsProvider for FakeDetails {
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.requested_fields.lock().unwrap() = fields.iter().map(|f| f.to_string()).collect();

        if let Some(millis) = self.delays_ms.get(place_id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        if self.failing.contains(place_id) {
            return Err(MapsError::HttpStatus(500));
        }

        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| MapsError::ApiError {
                status: "NOT_FOUND".to_string(),
                message: String::new(),
            })
    }
}

pub fn nearby(place_id: &str, lat: f64, lng: f64) -> NearbyPlace {
    NearbyPlace {
        place_id: Some(place_id.to_string()),
        name: Some(format!("Nearby {}", place_id)),
        coordinates: Some(Coordinates::new(lat, lng)),
        rating: Some(4.0),
    }
}

pub fn details(name: &str, reviews: &[&str]) -> PlaceDetails {
    PlaceDetails {
        name: Some(name.to_string()),
        address: Some(format!("{} Fifth Ave, New York, NY", name.len())),
        phone: Some("(212) 555-0100".to_string()),
        website: None,
        rating: Some(4.5),
        reviews: reviews.iter().map(|text| RawReview::from_text(*text)).collect(),
    }
}
