/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use shelf_server::{api, state::AppState};
use shelf_storage::LocalStorageContext;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Router backed by a migrated SQLite file in a temp dir
pub struct TestApp {
    pub router: Router,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = shelf_storage::create_pool(&db_url, 5)
            .await
            .expect("Failed to create pool");
        shelf_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(Arc::new(LocalStorageContext::new(pool)));

        Self {
            router: api::router(state),
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and decode the JSON body
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a media item and return its id
    pub async fn create_media(&self, user_id: i64, title: &str, creator: &str, media_type: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/media",
                serde_json::json!({
                    "user_id": user_id,
                    "title": title,
                    "creator": creator,
                    "type": media_type,
                    "status": "Not Started",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }

    /// Create a collection and return its id
    pub async fn create_collection(&self, user_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/collections",
                serde_json::json!({ "user_id": user_id, "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}
