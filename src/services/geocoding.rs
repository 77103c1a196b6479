//! Forward geocoding: resolve a free-text address to coordinates via
//! Nominatim (OpenStreetMap).

use crate::errors::ServiceError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Transient value object: degrees latitude/longitude. Never persisted; used
/// as a cache-key component and as the weather-provider request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Nominatim search client
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ServiceError::InternalError(format!("geocoder client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolves `address` to coordinates. `Ok(None)` means the geocoder had no
    /// match; transport and decode failures are errors. An empty address is a
    /// contract violation on the caller's side.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinates>, ServiceError> {
        if address.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "geocoding requires a non-empty address".to_string(),
            ));
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("geocoder request: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::ExternalServiceError(format!(
                "geocoder returned status {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("geocoder response: {}", e)))?;

        let Some(place) = places.into_iter().next() else {
            debug!(address, "geocoder found no match");
            return Ok(None);
        };

        let latitude = place.lat.parse::<f64>().map_err(|_| {
            ServiceError::ExternalServiceError(format!("geocoder returned bad latitude: {}", place.lat))
        })?;
        let longitude = place.lon.parse::<f64>().map_err(|_| {
            ServiceError::ExternalServiceError(format!(
                "geocoder returned bad longitude: {}",
                place.lon
            ))
        })?;

        Ok(Some(Coordinates {
            latitude,
            longitude,
        }))
    }
}
