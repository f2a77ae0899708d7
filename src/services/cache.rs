use crate::models::GeocodedLocation;
use crate::services::providers::{Geocoder, MapsError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Bounded in-memory memo of geocode results
///
/// Keyed by the literal location string as the caller sent it. Owned by the
/// service instance that created it; two instances never share entries.
pub struct GeocodeCache {
    entries: moka::future::Cache<String, GeocodedLocation>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl GeocodeCache {
    /// Create a cache holding at most `capacity` locations
    ///
    /// With `ttl` set, entries also expire that long after insertion.
    pub fn new(capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = moka::future::CacheBuilder::new(capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            entries: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, query: &str) -> Option<GeocodedLocation> {
        match self.entries.get(query).await {
            Some(location) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Geocode cache hit: {}", query);
                Some(location)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Geocode cache miss: {}", query);
                None
            }
        }
    }

    pub async fn insert(&self, query: &str, location: GeocodedLocation) {
        self.entries.insert(query.to_string(), location).await;
    }

    pub async fn invalidate(&self, query: &str) {
        self.entries.invalidate(query).await;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;

        CacheStats {
            entries: self.entries.entry_count(),
            hits,
            misses,
            hit_rate: if lookups > 0 {
                hits as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Geocoder decorator that memoizes successful lookups
///
/// Not-found answers and provider errors are not cached, so the next request
/// for the same string asks the provider again.
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    cache: GeocodeCache,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn Geocoder>, cache: GeocodeCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedLocation>, MapsError> {
        if let Some(location) = self.cache.get(query).await {
            return Ok(Some(location));
        }

        let resolved = self.inner.geocode(query).await?;
        if let Some(location) = &resolved {
            self.cache.insert(query, location.clone()).await;
        }

        let stats = self.cache.stats();
        tracing::debug!(
            "Geocode cache: {} entries, {} hits, {} misses ({:.0}% hit rate)",
            stats.entries,
            stats.hits,
            stats.misses,
            stats.hit_rate * 100.0
        );

        Ok(resolved)
    }
}
