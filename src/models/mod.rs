// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinates, CustomFilter, GeocodedLocation, GymCandidate, NearbyPlace, PlaceDetails,
    PreferenceVector, RankedGym, RawReview,
};
pub use requests::{CustomFilterRequest, GeocodeQuery, RecommendationRequest};
pub use responses::{
    round_rating, ErrorResponse, GymResponse, HealthResponse, LocationResponse, RootResponse,
};
