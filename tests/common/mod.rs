#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tracktrace_api::{
    api_v1_routes,
    cache::InMemoryCache,
    config::AppConfig,
    handlers::AppServices,
    migrator::Migrator,
    services::{geocoding::NominatimClient, openweather::OpenWeatherClient},
    AppState,
};

/// Test harness: in-memory SQLite, stub geocoder/weather servers, in-memory
/// cache, and the real router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub geocoder: MockServer,
    pub weather: MockServer,
    pub cache: Arc<InMemoryCache>,
}

impl TestApp {
    pub async fn new() -> Self {
        let geocoder = MockServer::start().await;
        let weather = MockServer::start().await;

        // A single connection keeps every query on the same in-memory database.
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options)
            .await
            .expect("failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        let db = Arc::new(db);

        let cache = Arc::new(InMemoryCache::new());
        let geocoder_client = Arc::new(
            NominatimClient::new(&geocoder.uri(), "tracktrace-tests").expect("geocoder client"),
        );
        let weather_client =
            Arc::new(OpenWeatherClient::new(&weather.uri(), "test-key").expect("weather client"));

        let services = AppServices::with_clients(
            db.clone(),
            cache.clone(),
            geocoder_client,
            weather_client,
            Duration::from_secs(7200),
        );

        let config = AppConfig::new(
            "sqlite::memory:",
            "redis://127.0.0.1:6379",
            "127.0.0.1",
            18_000,
            "test",
        );
        let state = AppState {
            db,
            config,
            services,
            redis: Arc::new(redis::Client::open("redis://127.0.0.1:6379").expect("redis client")),
        };

        let router = Router::new()
            .merge(tracktrace_api::health_routes())
            .nest("/api/v1", api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            geocoder,
            weather,
            cache,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Stubs the geocoder with a single fixed match for every query
    pub async fn stub_geocoder(&self, latitude: f64, longitude: f64) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": latitude.to_string(), "lon": longitude.to_string()}
            ])))
            .mount(&self.geocoder)
            .await;
    }

    /// Stubs the geocoder to find no match for any query
    pub async fn stub_geocoder_no_match(&self) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&self.geocoder)
            .await;
    }
}

/// The TN12345678 fixture: DHL shipment with two articles
pub fn fixture_shipment() -> Value {
    json!({
        "shipment": {
            "tracking_number": "TN12345678",
            "carrier": "DHL",
            "sender_address": "Street 10, 75001 Paris, France",
            "receiver_address": "Lisa-Fittko-Str 13, 10557 Berlin, Germany",
            "status": "in_transit"
        },
        "articles": [
            {"name": "Laptop", "quantity": 1, "price": 800.0, "sku": "LP123"},
            {"name": "Mouse", "quantity": 1, "price": 25.0, "sku": "MO456"}
        ]
    })
}

pub fn fixture_shipment_with(tracking_number: &str, carrier: &str) -> Value {
    let mut payload = fixture_shipment();
    payload["shipment"]["tracking_number"] = json!(tracking_number);
    payload["shipment"]["carrier"] = json!(carrier);
    payload
}
