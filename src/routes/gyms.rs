use crate::core::{RecommendError, RecommendationQuery, Recommender};
use crate::models::{
    ErrorResponse, GeocodeQuery, GymResponse, HealthResponse, LocationResponse,
    RecommendationRequest, RootResponse,
};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::{Validate, ValidationErrors};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// Configure all `/api` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/geocode", web::post().to(geocode))
        .route("/recommendations", web::post().to(recommendations));
}

/// Liveness banner
///
/// GET /
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(RootResponse {
        message: "FitFindr API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
    })
}

fn validation_failed(errors: &ValidationErrors) -> HttpResponse {
    let details = serde_json::to_value(errors).unwrap_or(serde_json::Value::Null);

    HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new("validation_failed", errors.to_string(), 422).with_details(details),
    )
}

fn recommend_error(err: &RecommendError) -> HttpResponse {
    match err {
        RecommendError::LocationNotFound(location) => {
            tracing::info!("Location not found: {}", location);
            HttpResponse::NotFound().json(ErrorResponse::new(
                "location_not_found",
                format!("Location not found: {}", location),
                404,
            ))
        }
        RecommendError::UpstreamUnavailable(e) => {
            tracing::error!("Maps provider failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "upstream_unavailable",
                e.to_string(),
                500,
            ))
        }
    }
}

/// Geocode endpoint
///
/// POST /api/geocode?location={location}
async fn geocode(
    state: web::Data<AppState>,
    query: web::Query<GeocodeQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(&errors);
    }

    match state.recommender.resolve_location(&query.location).await {
        Ok(location) => HttpResponse::Ok().json(LocationResponse::from(location)),
        Err(e) => recommend_error(&e),
    }
}

/// Recommendations endpoint
///
/// POST /api/recommendations
///
/// Request body:
/// ```json
/// {
///   "location": "string",
///   "hygiene": 3,
///   "equipment_quality": 3,
///   "less_crowd": 3,
///   "trainer_knowledge": 3,
///   "price": 3,
///   "amenities": 3,
///   "atmosphere": 3,
///   "custom_filters": [{"keyword": "string", "importance": 3}],
///   "min_rating": 0.0,
///   "max_distance": 5
/// }
/// ```
async fn recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {}", errors);
        return validation_failed(&errors);
    }

    let query = RecommendationQuery::from(req.into_inner());
    let span = tracing::info_span!("recommend", request_id = %uuid::Uuid::new_v4());

    tracing::info!(
        parent: &span,
        "Recommending gyms near {:?} (radius {} km, min rating {}, {} custom filters)",
        query.location,
        query.max_distance_km,
        query.min_rating,
        query.custom_filters.len()
    );

    match state.recommender.recommend(&query).instrument(span).await {
        Ok(recommendation) => {
            let gyms: Vec<GymResponse> = recommendation
                .gyms
                .into_iter()
                .map(GymResponse::from)
                .collect();
            HttpResponse::Ok().json(gyms)
        }
        Err(e) => recommend_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MapsError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = recommend_error(&RecommendError::LocationNotFound("Atlantis".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_maps_to_500() {
        let response = recommend_error(&RecommendError::UpstreamUnavailable(MapsError::HttpStatus(503)));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
