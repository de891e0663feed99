/// Server error types
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use deviceconfig_core::DeviceError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::middleware::negotiation::MERGE_PATCH_JSON;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Body of every error response that carries one
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = json!(["A device with id macpro-m1-95014 was not found."]))]
    pub messages: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// One message per rejected field or a single decode message
    #[error("Bad request: {}", .0.join("; "))]
    BadRequest(Vec<String>),

    #[error("Unsupported media type")]
    UnsupportedMediaType { accept_patch: bool },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(vec![message.into()])
    }
}

impl From<DeviceError> for ServerError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::NotFound(_) => Self::NotFound(err.to_string()),
            DeviceError::AlreadyExists(_) | DeviceError::TypeConflict { .. } => {
                Self::Conflict(err.to_string())
            }
            DeviceError::Storage(msg) => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, vec![msg]),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, vec![msg]),
            ServerError::BadRequest(messages) => (StatusCode::BAD_REQUEST, messages),
            ServerError::UnsupportedMediaType { accept_patch } => {
                let mut response = StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response();
                if accept_patch {
                    advertise_merge_patch(&mut response);
                }
                return response;
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["Internal server error".to_string()],
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["Internal server error".to_string()],
                )
            }
        };

        (status, Json(ErrorBody { messages })).into_response()
    }
}

/// Add `Accept-Patch: application/merge-patch+json` to a response
pub fn advertise_merge_patch(response: &mut Response) {
    response.headers_mut().insert(
        header::HeaderName::from_static("accept-patch"),
        HeaderValue::from_static(MERGE_PATCH_JSON),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use deviceconfig_core::types::{DeviceId, DeviceType};

    #[test]
    fn device_errors_map_to_statuses() {
        let id = DeviceId::new("macpro-m1-95014");
        let cases = [
            (DeviceError::NotFound(id.clone()), StatusCode::NOT_FOUND),
            (DeviceError::AlreadyExists(id.clone()), StatusCode::CONFLICT),
            (
                DeviceError::type_conflict(id, DeviceType::Computer, DeviceType::Display),
                StatusCode::CONFLICT,
            ),
            (
                DeviceError::storage("disk I/O error"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ServerError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn storage_details_stay_out_of_the_response() {
        let err = ServerError::from(DeviceError::storage("no such table: computer"));

        assert_eq!(
            err.to_string(),
            "Internal server error: no such table: computer"
        );
        assert!(matches!(err, ServerError::Internal(_)));
    }

    #[test]
    fn unsupported_media_type_advertises_merge_patch_on_request() {
        let plain = ServerError::UnsupportedMediaType {
            accept_patch: false,
        }
        .into_response();
        assert_eq!(plain.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(plain.headers().get("accept-patch").is_none());

        let advertised = ServerError::UnsupportedMediaType { accept_patch: true }.into_response();
        assert_eq!(
            advertised.headers().get("accept-patch").unwrap(),
            "application/merge-patch+json"
        );
    }
}
