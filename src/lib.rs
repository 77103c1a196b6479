//! Track & Trace API Library
//!
//! Stores shipments and their articles, and enriches single-shipment lookups
//! with current weather at the receiver address.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod cache;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::services::shipments::ShipmentService;
use crate::services::weather::WeatherService;

/// Shared application state, constructed once at startup and injected into
/// every handler. There are no ambient global handles.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
    pub redis: Arc<redis::Client>,
}

impl AppState {
    pub fn shipment_service(&self) -> Arc<ShipmentService> {
        self.services.shipments.clone()
    }

    pub fn weather_service(&self) -> Arc<WeatherService> {
        self.services.weather.clone()
    }
}

/// Versioned API surface, mounted under /api/v1
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shipments/",
            get(handlers::shipments::list_shipments).post(handlers::shipments::create_shipment),
        )
        .route(
            "/shipments/{tracking_number}",
            get(handlers::shipments::get_shipment),
        )
}

/// Liveness and readiness probes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health/live", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
}
