//! FitFindr - preference-tailored gym recommendations
//!
//! Geocodes a location, finds nearby gyms through a maps provider, scores each
//! gym's reviews against weighted user preferences and returns a ranked list.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

// Re-export commonly used types
pub use crate::core::{
    tailored_rating, tokenize, Accumulation, KeywordTaxonomy, PreferenceScorer, Recommendation,
    RecommendationQuery, RecommendError, Recommender,
};
pub use crate::models::{CustomFilter, GymResponse, PreferenceVector, RankedGym, RecommendationRequest};

/// Wire the recommender against the Google Maps provider from loaded settings
///
/// The geocode cache is created here and owned by the returned recommender.
pub fn build_recommender(settings: &crate::config::Settings) -> Result<Recommender, services::MapsError> {
    let google = Arc::new(services::GoogleMapsClient::new(
        settings.google.base_url.clone(),
        secrecy::SecretString::new(settings.google.api_key.clone().into()),
        settings.google.timeout(),
    )?);

    let cache = services::GeocodeCache::new(
        settings.geocode_cache.capacity,
        settings.geocode_cache.ttl(),
    );
    let geocoder = Arc::new(services::CachedGeocoder::new(google.clone(), cache));

    let scorer = PreferenceScorer::new(
        Arc::new(KeywordTaxonomy::default()),
        settings.recommendations.accumulation,
    );

    Ok(Recommender::new(geocoder, google.clone(), google, scorer)
        .with_place_type(settings.recommendations.place_type.clone())
        .with_max_concurrent_details(settings.recommendations.max_concurrent_details))
}
