//! Weather enrichment: geocode the receiver address, then resolve current
//! weather through a TTL cache. Every downstream failure degrades to "no
//! weather available"; nothing here is allowed to fail a shipment lookup.

use crate::cache::CacheBackend;
use crate::services::geocoding::{Coordinates, NominatimClient};
use crate::services::openweather::OpenWeatherClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const CACHE_KEY_PREFIX: &str = "weather_lat_lon";

/// Orchestrates geocoder -> cache -> weather provider -> cache write
pub struct WeatherService {
    geocoder: Arc<NominatimClient>,
    provider: Arc<OpenWeatherClient>,
    cache: Arc<dyn CacheBackend>,
    cache_ttl: Duration,
}

impl WeatherService {
    pub fn new(
        geocoder: Arc<NominatimClient>,
        provider: Arc<OpenWeatherClient>,
        cache: Arc<dyn CacheBackend>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            geocoder,
            provider,
            cache,
            cache_ttl,
        }
    }

    /// Returns the current weather at `address`, or `None` when any step of
    /// the chain fails. The geocoder is consulted on every call; only the
    /// resolved coordinates key into the cache, so repeated lookups of an
    /// unresolvable address re-hit the geocoder each time.
    #[instrument(skip(self))]
    pub async fn get_weather(&self, address: &str) -> Option<serde_json::Value> {
        let coordinates = match self.geocoder.geocode(address).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => {
                debug!(address, "no geocoding match, skipping weather lookup");
                return None;
            }
            Err(err) => {
                warn!(address, error = %err, "geocoding failed, skipping weather lookup");
                return None;
            }
        };

        let cache_key = cache_key(&coordinates);

        match self.cache.get(&cache_key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(payload) => {
                    debug!(cache_key, "returning cached weather payload");
                    return Some(payload);
                }
                Err(err) => {
                    warn!(cache_key, error = %err, "corrupt cache entry, refetching");
                }
            },
            Ok(None) => debug!(cache_key, "weather cache miss"),
            Err(err) => {
                warn!(cache_key, error = %err, "cache read failed, treating as miss");
            }
        }

        let payload = match self.provider.current_weather(&coordinates).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(cache_key, error = %err, "weather provider call failed");
                return None;
            }
        };

        // A write failure must not affect the return value.
        match serde_json::to_string(&payload) {
            Ok(raw) => {
                if let Err(err) = self.cache.set(&cache_key, &raw, Some(self.cache_ttl)).await {
                    warn!(cache_key, error = %err, "failed to cache weather payload");
                } else {
                    info!(
                        cache_key,
                        ttl_secs = self.cache_ttl.as_secs(),
                        "cached weather payload"
                    );
                }
            }
            Err(err) => warn!(cache_key, error = %err, "failed to serialize weather payload"),
        }

        Some(payload)
    }
}

/// Raw, unrounded coordinates keep the source's literal cache-key behavior:
/// only bit-identical resolutions share an entry.
fn cache_key(coordinates: &Coordinates) -> String {
    format!(
        "{}:{}:{}",
        CACHE_KEY_PREFIX, coordinates.latitude, coordinates.longitude
    )
}
