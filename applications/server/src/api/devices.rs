/// Device resource API routes
use crate::{
    error::{advertise_merge_patch, ErrorBody, Result, ServerError},
    middleware::negotiation::{has_content_type, JSON, MERGE_PATCH_JSON},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use deviceconfig_core::types::DeviceId;

use super::documents::{self, DeviceDocument, MergePatchDocument};

const COLLECTION_METHODS: &str = "GET, HEAD, POST, OPTIONS";
const DEVICE_METHODS: &str = "GET, HEAD, PUT, PATCH, OPTIONS";

/// GET /devices - List all devices
#[utoipa::path(
    get,
    path = "/devices",
    tag = "devices",
    responses((status = 200, description = "Every stored device", body = [DeviceDocument]))
)]
pub async fn list_devices(State(app_state): State<AppState>) -> Result<Json<Vec<DeviceDocument>>> {
    let devices = app_state.devices.find_all_devices().await?;
    tracing::info!(count = devices.len(), "Devices found");

    Ok(Json(devices.into_iter().map(DeviceDocument::from).collect()))
}

/// GET /devices/:id - Get one device
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = String, Path, description = "Device id")),
    responses(
        (status = 200, description = "The device", body = DeviceDocument),
        (status = 404, description = "No device with this id", body = ErrorBody),
    )
)]
pub async fn get_device(
    Path(device_id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<DeviceDocument>> {
    let device = app_state
        .devices
        .find_device_by_id(&DeviceId::new(device_id))
        .await?;
    tracing::info!(device_id = %device.id(), device_type = %device.device_type(), "Device found");

    Ok(Json(device.into()))
}

/// POST /devices - Create a device
///
/// Responds 201 with a `Location` header and no body.
#[utoipa::path(
    post,
    path = "/devices",
    tag = "devices",
    request_body(content = DeviceDocument, content_type = "application/json"),
    responses(
        (status = 201, description = "Device created",
            headers(("location" = String, description = "URL of the new device"))),
        (status = 400, description = "Malformed or invalid document", body = ErrorBody),
        (status = 409, description = "A device with this id exists", body = ErrorBody),
        (status = 415, description = "Body is not JSON"),
    )
)]
pub async fn create_device(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    if !has_content_type(&headers, JSON) {
        return Err(ServerError::UnsupportedMediaType {
            accept_patch: false,
        });
    }

    let device = DeviceDocument::from_json(&body)
        .and_then(DeviceDocument::into_device)
        .map_err(rejected)?;
    let location = device_location(device.id())?;

    app_state.devices.create_device(device).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// `/devices/{id}` with the id encoded as a single path segment
fn device_location(device_id: &DeviceId) -> Result<HeaderValue> {
    let location = format!("/devices/{}", urlencoding::encode(device_id.as_str()));
    HeaderValue::try_from(location).map_err(|e| ServerError::Internal(e.to_string()))
}

/// PUT /devices/:id - Replace every field of a device
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = String, Path, description = "Device id, equal to the document id")),
    request_body(content = DeviceDocument, content_type = "application/json"),
    responses(
        (status = 204, description = "Device replaced"),
        (status = 400, description = "Malformed or invalid document", body = ErrorBody),
        (status = 404, description = "No device with this id", body = ErrorBody),
        (status = 409, description = "Stored device has another type", body = ErrorBody),
        (status = 415, description = "Body is not JSON"),
    )
)]
pub async fn replace_device(
    Path(device_id): Path<String>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode> {
    if !has_content_type(&headers, JSON) {
        return Err(ServerError::UnsupportedMediaType { accept_patch: true });
    }

    let document = DeviceDocument::from_json(&body).map_err(rejected)?;
    if document.id() != device_id {
        let err = ServerError::bad_request(format!(
            "Resource ID in URL doesn't match device ID in document. resourceId: {}, deviceId: {}",
            device_id,
            document.id()
        ));
        return Err(rejected(err));
    }
    let device = document.into_device().map_err(rejected)?;

    app_state.devices.replace_device(device).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /devices/:id - Apply a JSON merge patch
///
/// Every error response advertises the merge-patch media type.
#[utoipa::path(
    patch,
    path = "/devices/{id}",
    tag = "devices",
    params(("id" = String, Path, description = "Device id")),
    request_body(
        content = MergePatchDocument,
        content_type = "application/merge-patch+json",
        description = "Fields to change; the document type follows the stored device",
    ),
    responses(
        (status = 204, description = "Patch applied"),
        (status = 400, description = "Malformed or invalid patch", body = ErrorBody),
        (status = 404, description = "No device with this id", body = ErrorBody),
        (status = 409, description = "Stored device changed type", body = ErrorBody),
        (status = 415, description = "Body is not a merge patch"),
    )
)]
pub async fn update_device(
    Path(device_id): Path<String>,
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match merge_patch(&app_state, DeviceId::new(device_id), &headers, &body).await {
        Ok(status) => status.into_response(),
        Err(err) => {
            let mut response = err.into_response();
            advertise_merge_patch(&mut response);
            response
        }
    }
}

async fn merge_patch(
    app_state: &AppState,
    device_id: DeviceId,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<StatusCode> {
    if !has_content_type(headers, MERGE_PATCH_JSON) {
        return Err(ServerError::UnsupportedMediaType { accept_patch: true });
    }

    // The stored variant decides which document the body is parsed as
    let device_type = app_state
        .devices
        .find_device_type_by_id(&device_id)
        .await?;
    tracing::debug!(device_id = %device_id, device_type = %device_type, "Device exists");

    let update = documents::update_from_json(device_type, body).map_err(rejected)?;

    app_state.devices.update_device(&device_id, update).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// OPTIONS /devices
pub async fn collection_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, COLLECTION_METHODS)])
}

/// OPTIONS /devices/:id
pub async fn device_options() -> Response {
    let mut response = (StatusCode::NO_CONTENT, [(header::ALLOW, DEVICE_METHODS)]).into_response();
    advertise_merge_patch(&mut response);
    response
}

fn rejected(err: ServerError) -> ServerError {
    tracing::info!("Request document rejected: {}", err);
    err
}
