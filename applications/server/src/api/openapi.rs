/// OpenAPI description of the device registry
use axum::Json;
use utoipa::OpenApi;

use super::{devices, documents, health};
use crate::error::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Device Config",
        description = "Registry of computers and displays with JSON merge-patch updates"
    ),
    paths(
        health::health,
        devices::list_devices,
        devices::get_device,
        devices::create_device,
        devices::replace_device,
        devices::update_device,
    ),
    components(schemas(
        documents::DeviceDocument,
        documents::ComputerDocument,
        documents::DisplayDocument,
        documents::MergePatchDocument,
        documents::ComputerUpdateDocument,
        documents::DisplayUpdateDocument,
        ErrorBody,
        health::HealthResponse,
    )),
    tags(
        (name = "devices", description = "Computers and displays"),
        (name = "health", description = "Server liveness"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
