// Service exports
pub mod cache;
pub mod google;
pub mod providers;

pub use cache::{CacheStats, CachedGeocoder, GeocodeCache};
pub use google::GoogleMapsClient;
pub use providers::{Geocoder, MapsError, PlaceDetailsProvider, PlacesSearch};
