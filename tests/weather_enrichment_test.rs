mod common;

use axum::http::StatusCode;
use common::{fixture_shipment, TestApp};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn lookup_attaches_provider_payload_and_serves_second_hit_from_cache() {
    let app = TestApp::new().await;
    app.stub_geocoder(52.5108, 13.3413).await;

    let payload = json!({
        "weather": [{"description": "clear sky"}],
        "main": {"temp": 293.65},
        "name": "Berlin"
    });
    // expect(1): the second lookup within the TTL window must be served from
    // the cache without another provider call.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&app.weather)
        .await;

    app.post_json("/api/v1/shipments/", fixture_shipment()).await;

    let (status, body) = app.get("/api/v1/shipments/TN12345678").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"], payload);

    let (status, body) = app.get("/api/v1/shipments/TN12345678").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weather"], payload);

    // Both lookups geocode afresh; only the weather payload is cached.
    assert_eq!(app.geocoder.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn provider_failure_degrades_to_null_weather() {
    let app = TestApp::new().await;
    app.stub_geocoder(52.5108, 13.3413).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.weather)
        .await;

    app.post_json("/api/v1/shipments/", fixture_shipment()).await;

    let (status, body) = app.get("/api/v1/shipments/TN12345678").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tracking_number"], "TN12345678");
    assert!(body["weather"].is_null());
}

#[tokio::test]
async fn geocoder_miss_degrades_to_null_weather() {
    let app = TestApp::new().await;
    app.stub_geocoder_no_match().await;

    app.post_json("/api/v1/shipments/", fixture_shipment()).await;

    let (status, body) = app.get("/api/v1/shipments/TN12345678").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["weather"].is_null());
    assert!(app.weather.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn dhl_listing_contains_exactly_the_created_shipment() {
    let app = TestApp::new().await;

    let (status, _) = app.post_json("/api/v1/shipments/", fixture_shipment()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/v1/shipments/?carrier=DHL").await;
    assert_eq!(status, StatusCode::OK);
    let shipments = body["shipments"].as_array().unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0]["tracking_number"], "TN12345678");
    assert_eq!(shipments[0]["articles"].as_array().unwrap().len(), 2);
}
