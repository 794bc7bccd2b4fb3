use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mathgame::{
    config::Config,
    create_router,
    db::{MemoryStore, SqliteStore},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// 존재하지 않는 프론트엔드 경로를 줘서 API만 서빙하게 합니다.
fn test_config() -> Config {
    Config {
        frontend_dist: "does-not-exist/dist".to_string(),
        ..Config::default()
    }
}

pub fn create_memory_app() -> Router {
    init_tracing();
    let state = AppState::new(Arc::new(MemoryStore::new()));
    create_router(state, &test_config())
}

pub async fn create_sqlite_app() -> Router {
    init_tracing();
    let store = SqliteStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory SQLite");
    let state = AppState::new(Arc::new(store));
    create_router(state, &test_config())
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "non-JSON body for {} {}: {}",
                method,
                uri,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, json)
}
