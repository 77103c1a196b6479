//! Current-weather lookups against OpenWeatherMap. The payload shape is
//! provider-defined and carried through opaquely.

use crate::errors::ServiceError;
use crate::services::geocoding::Coordinates;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// OpenWeatherMap client
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ServiceError::InternalError(format!("weather client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetches the current weather at `coordinates`. Any transport failure,
    /// non-success status, or malformed body is an error for the caller to
    /// absorb.
    pub async fn current_weather(
        &self,
        coordinates: &Coordinates,
    ) -> Result<serde_json::Value, ServiceError> {
        debug!(
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "requesting current weather"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("weather request: {}", e)))?;

        if !response.status().is_success() {
            return Err(ServiceError::ExternalServiceError(format!(
                "weather provider returned status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::ExternalServiceError(format!("weather response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn berlin() -> Coordinates {
        Coordinates {
            latitude: 52.5108,
            longitude: 13.3413,
        }
    }

    #[tokio::test]
    async fn passes_coordinates_and_key() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({
            "weather": [{"description": "clear sky"}],
            "main": {"temp": 293.65}
        });
        Mock::given(method("GET"))
            .and(query_param("lat", "52.5108"))
            .and(query_param("lon", "13.3413"))
            .and(query_param("appid", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri(), "secret").unwrap();
        assert_eq!(client.current_weather(&berlin()).await.unwrap(), payload);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = OpenWeatherClient::new(&server.uri(), "").unwrap();
        let err = client.current_weather(&berlin()).await.unwrap_err();
        assert!(matches!(err, ServiceError::ExternalServiceError(_)));
    }
}
