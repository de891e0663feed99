/// API route modules
pub mod devices;
pub mod documents;
pub mod health;
pub mod openapi;
pub mod validation;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::{middleware, state::AppState};

/// Build the HTTP router
///
/// `GET` routes answer `HEAD` as well. Any other unregistered method on a
/// known path is answered with 405 and an `Allow` header.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi::openapi))
        .route(
            "/devices",
            get(devices::list_devices)
                .post(devices::create_device)
                .options(devices::collection_options),
        )
        .route(
            "/devices/:id",
            get(devices::get_device)
                .put(devices::replace_device)
                .patch(devices::update_device)
                .options(devices::device_options),
        )
        .layer(axum_middleware::from_fn(middleware::require_json_accept))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .with_state(app_state)
}
