use actix_web::{middleware, web, App, HttpServer};
use fitfindr::config::Settings;
use fitfindr::routes::{self, AppState};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the configured level applies
    let settings = Settings::load();

    // Initialize logging
    let (default_level, default_format) = match &settings {
        Ok(s) => (s.logging.level.clone(), s.logging.format.clone()),
        Err(_) => ("info".to_string(), "compact".to_string()),
    };
    let log_level = std::env::var("LOG_LEVEL").unwrap_or(default_level);
    let log_format = std::env::var("LOG_FORMAT").unwrap_or(default_format);

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting FitFindr API...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Configuration loaded successfully");

    let recommender = fitfindr::build_recommender(&settings).map_err(|e| {
        error!("Failed to create maps client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Recommender initialized (place type: {}, geocode cache: {} entries, {:?} accumulation)",
        settings.recommendations.place_type,
        settings.geocode_cache.capacity,
        settings.recommendations.accumulation
    );

    // Build application state
    let app_state = AppState {
        recommender: Arc::new(recommender),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let allowed_origins = settings.cors.allowed_origins.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(routes::cors_policy(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
