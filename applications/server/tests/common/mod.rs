//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use deviceconfig_core::DeviceService;
use deviceconfig_server::{create_router, state::AppState};
use deviceconfig_storage::SqliteDeviceStore;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const JSON: &str = "application/json";
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// Router on top of a fresh file-backed database
pub struct TestApp {
    pub router: Router,
    _temp_dir: TempDir,
}

/// A finished response with its body collected
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn messages(&self) -> Vec<String> {
        serde_json::from_value(self.json()["messages"].clone()).expect("no messages in body")
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = deviceconfig_storage::create_pool(&db_url).await.unwrap();
        deviceconfig_storage::run_migrations(&pool).await.unwrap();

        let service = DeviceService::new(Arc::new(SqliteDeviceStore::new(pool)));
        let router = create_router(AppState::new(Arc::new(service)));

        Self {
            router,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request built by the caller
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(&self, method: Method, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn request_with_body(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        body: &Value,
    ) -> TestResponse {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri).await
    }

    pub async fn post(&self, body: &Value) -> TestResponse {
        self.request_with_body(Method::POST, "/devices", JSON, body)
            .await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> TestResponse {
        self.request_with_body(Method::PUT, uri, JSON, body).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> TestResponse {
        self.request_with_body(Method::PATCH, uri, MERGE_PATCH_JSON, body)
            .await
    }
}

/// Test fixtures
pub mod fixtures {
    use serde_json::{json, Value};

    pub const COMPUTER_ID: &str = "macpro-m1-95014";
    pub const DISPLAY_ID: &str = "samsung-screen-88276";

    pub fn computer() -> Value {
        json!({
            "type": "computer",
            "id": COMPUTER_ID,
            "name": "best mac",
            "username": "timapple",
            "password": "0n3m0r3th1ng",
            "ipAddress": "192.168.178.1",
        })
    }

    pub fn display() -> Value {
        json!({
            "type": "display",
            "id": DISPLAY_ID,
            "name": "second best screen",
            "resolution": "WQHD",
        })
    }
}
