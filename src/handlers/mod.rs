pub mod health;
pub mod shipments;

use crate::cache::CacheBackend;
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::geocoding::NominatimClient;
use crate::services::openweather::OpenWeatherClient;
use crate::services::shipments::ShipmentService;
use crate::services::weather::WeatherService;
use std::sync::Arc;
use std::time::Duration;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub shipments: Arc<ShipmentService>,
    pub weather: Arc<WeatherService>,
}

impl AppServices {
    /// Builds the service container with outbound clients derived from config
    pub fn new(
        db_pool: Arc<DbPool>,
        cache: Arc<dyn CacheBackend>,
        config: &AppConfig,
    ) -> Result<Self, ServiceError> {
        let geocoder = Arc::new(NominatimClient::new(
            &config.geocoder_base_url,
            &config.geocoder_user_agent,
        )?);
        let provider = Arc::new(OpenWeatherClient::new(
            &config.weather_base_url,
            config.openweathermap_api_key.clone().unwrap_or_default(),
        )?);

        Ok(Self::with_clients(
            db_pool,
            cache,
            geocoder,
            provider,
            Duration::from_secs(config.weather_cache_ttl_secs),
        ))
    }

    /// Assembles the container from pre-built clients; used directly by tests
    /// to point the weather chain at stub servers.
    pub fn with_clients(
        db_pool: Arc<DbPool>,
        cache: Arc<dyn CacheBackend>,
        geocoder: Arc<NominatimClient>,
        provider: Arc<OpenWeatherClient>,
        weather_cache_ttl: Duration,
    ) -> Self {
        Self {
            shipments: Arc::new(ShipmentService::new(db_pool)),
            weather: Arc::new(WeatherService::new(
                geocoder,
                provider,
                cache,
                weather_cache_ttl,
            )),
        }
    }
}
