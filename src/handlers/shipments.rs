use crate::{
    entities::{article, shipment::ShipmentStatus},
    errors::ServiceError,
    services::shipments::{NewArticle, NewShipment, ShipmentWithArticles},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Default, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShipmentListQuery {
    /// Exact carrier to filter by; empty or absent returns all shipments
    pub carrier: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "tracking_number": "TN12345678",
    "carrier": "DHL",
    "sender_address": "Street 10, 75001 Paris, France",
    "receiver_address": "Lisa-Fittko-Str 13, 10557 Berlin, Germany",
    "status": "in_transit"
}))]
pub struct ShipmentPayload {
    #[validate(length(min = 1, message = "Tracking number is required"))]
    pub tracking_number: String,
    #[validate(length(min = 1))]
    pub carrier: String,
    #[validate(length(min = 1))]
    pub sender_address: String,
    #[validate(length(min = 1))]
    pub receiver_address: String,
    pub status: ShipmentStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Laptop", "quantity": 1, "price": 800.0, "sku": "LP123"}))]
pub struct ArticlePayload {
    pub name: String,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub sku: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShipmentRequest {
    #[validate]
    pub shipment: ShipmentPayload,
    #[serde(default)]
    pub articles: Vec<ArticlePayload>,
}

impl From<ShipmentPayload> for NewShipment {
    fn from(payload: ShipmentPayload) -> Self {
        Self {
            tracking_number: payload.tracking_number,
            carrier: payload.carrier,
            sender_address: payload.sender_address,
            receiver_address: payload.receiver_address,
            status: payload.status,
        }
    }
}

impl From<ArticlePayload> for NewArticle {
    fn from(payload: ArticlePayload) -> Self {
        Self {
            name: payload.name,
            quantity: payload.quantity,
            price: payload.price,
            sku: payload.sku,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    pub id: i32,
    pub name: String,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub sku: String,
}

impl From<article::Model> for ArticleResponse {
    fn from(model: article::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            price: model.price,
            sku: model.sku,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShipmentResponse {
    pub id: i32,
    pub tracking_number: String,
    pub carrier: String,
    pub sender_address: String,
    pub receiver_address: String,
    pub status: ShipmentStatus,
    pub articles: Vec<ArticleResponse>,
}

impl From<ShipmentWithArticles> for ShipmentResponse {
    fn from((model, articles): ShipmentWithArticles) -> Self {
        Self {
            id: model.id,
            tracking_number: model.tracking_number,
            carrier: model.carrier,
            sender_address: model.sender_address,
            receiver_address: model.receiver_address,
            status: model.status,
            articles: articles.into_iter().map(ArticleResponse::from).collect(),
        }
    }
}

/// Single-shipment response, enriched with current weather at the receiver
/// address. `weather` is null whenever enrichment was not possible.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShipmentWithWeatherResponse {
    #[serde(flatten)]
    pub shipment: ShipmentResponse,
    #[schema(value_type = Option<Object>)]
    pub weather: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShipmentsResponse {
    pub shipments: Vec<ShipmentResponse>,
}

#[utoipa::path(
    get,
    path = "/api/v1/shipments/",
    params(ShipmentListQuery),
    responses(
        (status = 200, description = "Shipments listed", body = ShipmentsResponse),
        (status = 404, description = "No shipments found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(query): Query<ShipmentListQuery>,
) -> Result<Json<ShipmentsResponse>, ServiceError> {
    let carrier = query
        .carrier
        .as_deref()
        .map(str::trim)
        .filter(|carrier| !carrier.is_empty());

    let shipments = state.shipment_service().list_shipments(carrier).await?;

    // An empty result set is an explicit not-found condition, not an empty list.
    if shipments.is_empty() {
        return Err(ServiceError::NotFound("No shipments found".to_string()));
    }

    Ok(Json(ShipmentsResponse {
        shipments: shipments.into_iter().map(ShipmentResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/shipments/{tracking_number}",
    params(("tracking_number" = String, Path, description = "Shipment tracking number")),
    responses(
        (status = 200, description = "Shipment with weather enrichment", body = ShipmentWithWeatherResponse),
        (status = 400, description = "Empty tracking number", body = crate::errors::ErrorResponse),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<ShipmentWithWeatherResponse>, ServiceError> {
    if tracking_number.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "Tracking number is required".to_string(),
        ));
    }

    let Some(found) = state
        .shipment_service()
        .find_by_tracking_number(&tracking_number)
        .await?
    else {
        return Err(ServiceError::NotFound(format!(
            "Shipment with tracking number {} not found",
            tracking_number
        )));
    };

    // Enrichment failures surface as a null weather field, never as an error.
    let weather = state
        .weather_service()
        .get_weather(&found.0.receiver_address)
        .await;

    Ok(Json(ShipmentWithWeatherResponse {
        shipment: ShipmentResponse::from(found),
        weather,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/shipments/",
    request_body = CreateShipmentRequest,
    responses(
        (status = 201, description = "Shipment created", body = ShipmentResponse),
        (status = 204, description = "Tracking number already exists; existing shipment returned unchanged"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "shipments"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipmentRequest>,
) -> Result<(StatusCode, Json<ShipmentResponse>), ServiceError> {
    payload
        .validate()
        .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

    if let Some(existing) = state
        .shipment_service()
        .find_by_tracking_number(&payload.shipment.tracking_number)
        .await?
    {
        return Ok((StatusCode::NO_CONTENT, Json(ShipmentResponse::from(existing))));
    }

    let created = state
        .shipment_service()
        .create_shipment(
            payload.shipment.into(),
            payload.articles.into_iter().map(NewArticle::from).collect(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ShipmentResponse::from(created))))
}
