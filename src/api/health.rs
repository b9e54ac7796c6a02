use crate::SharedData;
use crate::dto;
use crate::routing_utils::Json;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(healthz), components(schemas(dto::HealthzResponse)))]
/// Defines the OpenAPI documentation for the liveness probe
pub struct HealthApi;

/// Creates a router holding the liveness probe. Nothing here touches the database.
pub fn health_routes() -> Router<Arc<SharedData>> {
    Router::new().route("/healthz", get(healthz))
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "The server is up", body = dto::HealthzResponse),
    ),
)]
async fn healthz() -> Json<dto::HealthzResponse> {
    Json(dto::HealthzResponse::ok())
}
