use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// WGS84 coordinates in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A location string resolved by the geocoding provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedLocation {
    pub coordinates: Coordinates,
    pub formatted_address: String,
}

/// Per-category preference weights, keyed by category name
///
/// Built once per request and never mutated afterwards. Categories without a
/// weight contribute nothing to a review's score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceVector {
    weights: BTreeMap<String, u8>,
}

impl PreferenceVector {
    pub fn weight(&self, category: &str) -> Option<u8> {
        self.weights.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.weights.iter().map(|(category, weight)| (category.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for PreferenceVector {
    fn from_iter<I: IntoIterator<Item = (S, u8)>>(iter: I) -> Self {
        Self {
            weights: iter
                .into_iter()
                .map(|(category, weight)| (category.into(), weight))
                .collect(),
        }
    }
}

/// Caller-supplied keyword with its importance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFilter {
    pub keyword: String,
    pub importance: u8,
}

impl CustomFilter {
    pub fn new(keyword: impl Into<String>, importance: u8) -> Self {
        Self {
            keyword: keyword.into(),
            importance,
        }
    }
}

/// A single review as returned by the place details provider
///
/// Only `text` takes part in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl RawReview {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A place as returned by nearby search, before detail enrichment
///
/// Fields are optional because provider payloads are not trusted; a candidate
/// missing its id or coordinates is dropped by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub rating: Option<f64>,
}

/// Place details as returned by the details provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Vec<RawReview>,
}

/// A gym with everything known about it after enrichment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymCandidate {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub coordinates: Coordinates,
    pub reviews: Vec<RawReview>,
    /// Provider-assigned rating, informational only
    pub base_rating: Option<f64>,
}

impl GymCandidate {
    /// Merge a nearby-search hit with its details payload
    pub fn from_parts(
        place_id: String,
        coordinates: Coordinates,
        nearby: &NearbyPlace,
        details: PlaceDetails,
    ) -> Self {
        Self {
            place_id,
            name: details
                .name
                .or_else(|| nearby.name.clone())
                .unwrap_or_default(),
            address: details.address.unwrap_or_default(),
            phone: details.phone,
            website: details.website,
            coordinates,
            reviews: details.reviews,
            base_rating: details.rating.or(nearby.rating),
        }
    }
}

/// A scored gym, the unit the pipeline ranks and returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedGym {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub coordinates: Coordinates,
    pub review_count: usize,
    pub base_rating: Option<f64>,
    /// Average preference score over the gym's reviews, never negative
    pub tailored_rating: f64,
}

impl RankedGym {
    pub fn new(candidate: GymCandidate, tailored_rating: f64) -> Self {
        Self {
            place_id: candidate.place_id,
            name: candidate.name,
            address: candidate.address,
            phone: candidate.phone,
            website: candidate.website,
            coordinates: candidate.coordinates,
            review_count: candidate.reviews.len(),
            base_rating: candidate.base_rating,
            tailored_rating,
        }
    }
}
