use crate::core::aggregate::tailored_rating;
use crate::core::scoring::PreferenceScorer;
use crate::models::{
    CustomFilter, GeocodedLocation, GymCandidate, NearbyPlace, PreferenceVector, RankedGym,
};
use crate::services::{Geocoder, MapsError, PlaceDetailsProvider, PlacesSearch};
use futures_util::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Fields requested from the place details provider
pub const DETAIL_FIELDS: [&str; 6] = [
    "name",
    "rating",
    "reviews",
    "formatted_address",
    "formatted_phone_number",
    "website",
];

pub const DEFAULT_PLACE_TYPE: &str = "gym";
pub const DEFAULT_MAX_CONCURRENT_DETAILS: usize = 8;

/// Request-fatal pipeline failures
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Maps provider unavailable: {0}")]
    UpstreamUnavailable(#[from] MapsError),
}

/// Why a single candidate was left out of the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Nearby search payload lacked an id or coordinates
    MalformedPlace(&'static str),
    /// Details fetch failed for this place
    DetailsUnavailable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedPlace(what) => write!(f, "malformed place: {}", what),
            SkipReason::DetailsUnavailable(e) => write!(f, "details unavailable: {}", e),
        }
    }
}

/// A candidate dropped from the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    pub place_id: Option<String>,
    pub reason: SkipReason,
}

/// Outcome of evaluating one candidate
pub type CandidateOutcome = Result<RankedGym, CandidateFailure>;

/// Inputs of one recommendation run
#[derive(Debug, Clone)]
pub struct RecommendationQuery {
    pub location: String,
    pub preferences: PreferenceVector,
    pub custom_filters: Vec<CustomFilter>,
    pub min_rating: f64,
    pub max_distance_km: u32,
}

/// Result of the recommendation process
#[derive(Debug)]
pub struct Recommendation {
    pub location: GeocodedLocation,
    pub gyms: Vec<RankedGym>,
    pub total_candidates: usize,
    pub skipped: Vec<CandidateFailure>,
}

/// Main recommendation orchestrator
///
/// # Pipeline Stages
/// 1. Geocode the location string
/// 2. Nearby search for candidates within the radius
/// 3. Per-candidate detail fetch (bounded fan-out)
/// 4. Review scoring and aggregation
/// 5. Minimum rating filter
/// 6. Ranking
pub struct Recommender {
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlacesSearch>,
    details: Arc<dyn PlaceDetailsProvider>,
    scorer: PreferenceScorer,
    place_type: String,
    max_concurrent_details: usize,
}

impl Recommender {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        places: Arc<dyn PlacesSearch>,
        details: Arc<dyn PlaceDetailsProvider>,
        scorer: PreferenceScorer,
    ) -> Self {
        Self {
            geocoder,
            places,
            details,
            scorer,
            place_type: DEFAULT_PLACE_TYPE.to_string(),
            max_concurrent_details: DEFAULT_MAX_CONCURRENT_DETAILS,
        }
    }

    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = place_type.into();
        self
    }

    /// Bound the number of detail fetches in flight (at least 1)
    pub fn with_max_concurrent_details(mut self, max: usize) -> Self {
        self.max_concurrent_details = max.max(1);
        self
    }

    pub fn scorer(&self) -> &PreferenceScorer {
        &self.scorer
    }

    /// Resolve a location string to coordinates
    pub async fn resolve_location(&self, location: &str) -> Result<GeocodedLocation, RecommendError> {
        self.geocoder
            .geocode(location)
            .await?
            .ok_or_else(|| RecommendError::LocationNotFound(location.to_string()))
    }

    /// Run the complete pipeline for one request
    ///
    /// Only the geocode and nearby search calls can fail the request. Every
    /// per-candidate failure is recorded in [`Recommendation::skipped`] and the
    /// candidate is left out.
    pub async fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Recommendation, RecommendError> {
        let location = self.resolve_location(&query.location).await?;

        let radius_meters = query.max_distance_km.saturating_mul(1000);

        tracing::info!(
            "Searching {} within {}m of {} ({}, {})",
            self.place_type,
            radius_meters,
            location.formatted_address,
            location.coordinates.lat,
            location.coordinates.lng
        );

        let candidates = self
            .places
            .nearby_search(location.coordinates, radius_meters, &self.place_type)
            .await?;

        let total_candidates = candidates.len();

        // Ordered buffering keeps provider order regardless of completion order
        let outcomes: Vec<CandidateOutcome> = stream::iter(candidates)
            .map(|candidate| self.evaluate_candidate(candidate, query))
            .buffered(self.max_concurrent_details)
            .collect()
            .await;

        let mut scored = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();

        for outcome in outcomes {
            match outcome {
                Ok(gym) => scored.push(gym),
                Err(failure) => {
                    tracing::warn!(
                        "Skipping candidate {}: {}",
                        failure.place_id.as_deref().unwrap_or("<unknown>"),
                        failure.reason
                    );
                    skipped.push(failure);
                }
            }
        }

        let gyms = rank_gyms(scored, query.min_rating);

        tracing::info!(
            "Ranked {} gyms from {} candidates ({} skipped)",
            gyms.len(),
            total_candidates,
            skipped.len()
        );

        Ok(Recommendation {
            location,
            gyms,
            total_candidates,
            skipped,
        })
    }

    /// Fetch details for one candidate and score its reviews
    async fn evaluate_candidate(
        &self,
        nearby: NearbyPlace,
        query: &RecommendationQuery,
    ) -> CandidateOutcome {
        let Some(place_id) = nearby.place_id.clone() else {
            return Err(CandidateFailure {
                place_id: None,
                reason: SkipReason::MalformedPlace("missing place id"),
            });
        };

        let Some(coordinates) = nearby.coordinates else {
            return Err(CandidateFailure {
                place_id: Some(place_id),
                reason: SkipReason::MalformedPlace("missing coordinates"),
            });
        };

        let details = match self.details.place_details(&place_id, &DETAIL_FIELDS).await {
            Ok(details) => details,
            Err(e) => {
                return Err(CandidateFailure {
                    place_id: Some(place_id),
                    reason: SkipReason::DetailsUnavailable(e.to_string()),
                });
            }
        };

        let candidate = GymCandidate::from_parts(place_id, coordinates, &nearby, details);
        let rating = tailored_rating(
            &self.scorer,
            &candidate.reviews,
            &query.preferences,
            &query.custom_filters,
        );

        tracing::debug!(
            "Scored {} ({} reviews): {:.2}",
            candidate.name,
            candidate.reviews.len(),
            rating
        );

        Ok(RankedGym::new(candidate, rating))
    }
}

/// Drop gyms under `min_rating` and sort the rest by tailored rating, highest first
///
/// The sort is stable: gyms with equal ratings keep their input order.
pub fn rank_gyms(gyms: Vec<RankedGym>, min_rating: f64) -> Vec<RankedGym> {
    let mut ranked: Vec<RankedGym> = gyms
        .into_iter()
        .filter(|gym| gym.tailored_rating >= min_rating)
        .collect();

    ranked.sort_by(|a, b| {
        b.tailored_rating
            .partial_cmp(&a.tailored_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn gym(id: &str, rating: f64) -> RankedGym {
        RankedGym {
            place_id: id.to_string(),
            name: format!("Gym {}", id),
            address: String::new(),
            phone: None,
            website: None,
            coordinates: Coordinates::new(40.78, -73.96),
            review_count: 1,
            base_rating: None,
            tailored_rating: rating,
        }
    }

    fn ids(gyms: &[RankedGym]) -> Vec<&str> {
        gyms.iter().map(|g| g.place_id.as_str()).collect()
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank_gyms(vec![gym("a", 1.0), gym("b", 7.5), gym("c", 3.0)], 0.0);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_filters_below_min_rating() {
        let ranked = rank_gyms(vec![gym("a", 0.0), gym("b", 2.0), gym("c", 1.99)], 2.0);
        assert_eq!(ids(&ranked), vec!["b"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked = rank_gyms(
            vec![gym("a", 3.0), gym("b", 5.0), gym("c", 3.0), gym("d", 3.0)],
            0.0,
        );
        assert_eq!(ids(&ranked), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_rank_zero_min_rating_keeps_unreviewed() {
        let ranked = rank_gyms(vec![gym("a", 0.0)], 0.0);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::DetailsUnavailable("HTTP 500".to_string());
        assert_eq!(reason.to_string(), "details unavailable: HTTP 500");
    }
}
