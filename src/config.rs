use crate::core::Accumulation;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub google: GoogleSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub geocode_cache: GeocodeCacheSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Clone, Deserialize)]
pub struct GoogleSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_google_base_url")]
    pub base_url: String,
    #[serde(default = "default_google_timeout")]
    pub timeout_secs: u64,
}

impl GoogleSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for GoogleSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_google_base_url() -> String { crate::services::google::DEFAULT_BASE_URL.to_string() }
fn default_google_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCacheSettings {
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    pub ttl_secs: Option<u64>,
}

impl GeocodeCacheSettings {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

impl Default for GeocodeCacheSettings {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: None,
        }
    }
}

fn default_cache_capacity() -> u64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_place_type")]
    pub place_type: String,
    #[serde(default = "default_max_concurrent_details")]
    pub max_concurrent_details: usize,
    #[serde(default)]
    pub accumulation: Accumulation,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            place_type: default_place_type(),
            max_concurrent_details: default_max_concurrent_details(),
            accumulation: Accumulation::default(),
        }
    }
}

fn default_place_type() -> String { crate::core::recommender::DEFAULT_PLACE_TYPE.to_string() }
fn default_max_concurrent_details() -> usize { crate::core::recommender::DEFAULT_MAX_CONCURRENT_DETAILS }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FITFINDR)
    /// 5. GOOGLE_MAPS_API_KEY for the provider credential
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FITFINDR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        let settings = substitute_env_vars(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.google.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "Google Maps API key is missing (set GOOGLE_MAPS_API_KEY)".to_string(),
            ));
        }
        if self.geocode_cache.capacity == 0 {
            return Err(ConfigError::Message(
                "geocode_cache.capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FITFINDR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        // e.g., FITFINDR__CORS__ALLOWED_ORIGINS=http://a.test,http://b.test
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
}

/// Apply the well-known provider credential variable over the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(api_key) = std::env::var("GOOGLE_MAPS_API_KEY") {
        builder = builder.set_override("google.api_key", api_key)?;
    }

    builder.build()
}
