use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;
use std::time::Instant;

/// Component health status
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    pub message: String,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: ComponentStatus,
    pub database: ComponentHealth,
    pub redis: ComponentHealth,
}

/// Liveness probe: the process is up and serving
pub async fn liveness_check() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Readiness probe: database and cache are reachable
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = check_database(&state).await;
    let redis = check_redis(&state).await;

    let healthy = matches!(database.status, ComponentStatus::Up)
        && matches!(redis.status, ComponentStatus::Up);
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if healthy {
                ComponentStatus::Up
            } else {
                ComponentStatus::Down
            },
            database,
            redis,
        }),
    )
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    match state.db.ping().await {
        Ok(()) => ComponentHealth {
            status: ComponentStatus::Up,
            message: "connected".to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(err) => ComponentHealth {
            status: ComponentStatus::Down,
            message: err.to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
    }
}

async fn check_redis(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let result = async {
        let mut conn = state.redis.get_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await
    }
    .await;

    match result {
        Ok(_) => ComponentHealth {
            status: ComponentStatus::Up,
            message: "connected".to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
        Err(err) => ComponentHealth {
            status: ComponentStatus::Down,
            message: err.to_string(),
            latency_ms: start.elapsed().as_millis() as u64,
        },
    }
}
