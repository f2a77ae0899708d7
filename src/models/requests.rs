use crate::core::taxonomy::{
    AMENITIES, ATMOSPHERE, EQUIPMENT_QUALITY, HYGIENE, LESS_CROWD, PRICE, TRAINER_KNOWLEDGE,
};
use crate::core::RecommendationQuery;
use crate::models::{CustomFilter, PreferenceVector};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to get gym recommendations
///
/// Integer fields are `i64` and narrowed after validation, so out-of-range
/// values surface as field errors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub location: String,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub hygiene: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub equipment_quality: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub less_crowd: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub trainer_knowledge: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub price: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub amenities: i64,
    #[serde(default = "default_weight")]
    #[validate(range(min = 1, max = 5))]
    pub atmosphere: i64,
    #[serde(default)]
    #[validate(nested)]
    pub custom_filters: Vec<CustomFilterRequest>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub min_rating: f64,
    #[serde(default = "default_max_distance")]
    #[validate(range(min = 1, max = 10))]
    pub max_distance: i64,
}

/// Custom keyword filter as sent by the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomFilterRequest {
    #[validate(length(min = 1))]
    pub keyword: String,
    #[validate(range(min = 1, max = 5))]
    pub importance: i64,
}

/// Reject locations made only of whitespace
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("location must not be blank".into());
        return Err(err);
    }
    Ok(())
}

fn default_weight() -> i64 {
    3
}

fn default_max_distance() -> i64 {
    5
}

/// Clamp a validated integer into the domain type
fn narrow(value: i64, min: i64, max: i64) -> i64 {
    value.clamp(min, max)
}

impl RecommendationRequest {
    /// Build the request's preference vector, one weight per fixed category
    pub fn preferences(&self) -> PreferenceVector {
        [
            (HYGIENE, self.hygiene),
            (EQUIPMENT_QUALITY, self.equipment_quality),
            (LESS_CROWD, self.less_crowd),
            (TRAINER_KNOWLEDGE, self.trainer_knowledge),
            (PRICE, self.price),
            (AMENITIES, self.amenities),
            (ATMOSPHERE, self.atmosphere),
        ]
        .into_iter()
        .map(|(category, weight)| (category, narrow(weight, 1, 5) as u8))
        .collect()
    }
}

impl From<CustomFilterRequest> for CustomFilter {
    fn from(value: CustomFilterRequest) -> Self {
        CustomFilter::new(value.keyword, narrow(value.importance, 1, 5) as u8)
    }
}

impl From<RecommendationRequest> for RecommendationQuery {
    fn from(request: RecommendationRequest) -> Self {
        let preferences = request.preferences();

        RecommendationQuery {
            location: request.location,
            preferences,
            custom_filters: request.custom_filters.into_iter().map(Into::into).collect(),
            min_rating: request.min_rating,
            max_distance_km: narrow(request.max_distance, 1, 10) as u32,
        }
    }
}

/// Query string of the geocode endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GeocodeQuery {
    #[validate(length(min = 1), custom(function = "validate_not_blank"))]
    pub location: String,
}
