use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Track and Trace API",
        description = "API for tracking shipments and getting weather information"
    ),
    paths(
        crate::handlers::shipments::list_shipments,
        crate::handlers::shipments::get_shipment,
        crate::handlers::shipments::create_shipment,
    ),
    components(schemas(
        crate::handlers::shipments::ShipmentListQuery,
        crate::handlers::shipments::ShipmentPayload,
        crate::handlers::shipments::ArticlePayload,
        crate::handlers::shipments::CreateShipmentRequest,
        crate::handlers::shipments::ShipmentResponse,
        crate::handlers::shipments::ArticleResponse,
        crate::handlers::shipments::ShipmentWithWeatherResponse,
        crate::handlers::shipments::ShipmentsResponse,
        crate::entities::shipment::ShipmentStatus,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "shipments", description = "Shipment storage and weather-enriched lookup")
    )
)]
pub struct ApiDoc;

/// Swagger UI served at /swagger, with the OpenAPI document at
/// /api-docs/openapi.json
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi())
}
