// Route exports
pub mod errors;
pub mod gyms;

use actix_cors::Cors;
use actix_web::web;

pub use errors::{json_config, query_config};
pub use gyms::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(gyms::root))
        .service(web::scope("/api").configure(gyms::configure));
}

/// CORS policy for the configured front-end origins
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin.trim()))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
