/// Health check API route
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Whether the device registry can reach its store
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `unavailable` when no store transaction can be opened
    #[schema(example = "ok")]
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Device store is reachable", body = HealthResponse),
        (status = 503, description = "Device store is unavailable", body = HealthResponse),
    )
)]
pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = match app_state.devices.check_store().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            tracing::error!("Device store unavailable: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use deviceconfig_core::DeviceService;
    use deviceconfig_storage::SqliteDeviceStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn state(temp_dir: &TempDir, closed: bool) -> AppState {
        let db_url = format!("sqlite://{}", temp_dir.path().join("health.db").display());
        let pool = deviceconfig_storage::create_pool(&db_url).await.unwrap();
        if closed {
            pool.close().await;
        }

        let service = DeviceService::new(Arc::new(SqliteDeviceStore::new(pool)));
        AppState::new(Arc::new(service))
    }

    #[tokio::test]
    async fn reports_ok_with_package_version() {
        let temp_dir = TempDir::new().unwrap();

        let (code, Json(response)) = health(State(state(&temp_dir, false).await)).await;

        assert_eq!(code, StatusCode::OK);
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();

        let (code, Json(response)) = health(State(state(&temp_dir, true).await)).await;

        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status, "unavailable");
    }
}
