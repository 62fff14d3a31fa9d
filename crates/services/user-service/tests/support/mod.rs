//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    response::Json,
    routing::{get, MethodRouter},
    Router,
};
use serde_json::{json, Value};

use common::DatabaseConfig;
use user_service_lib::config::EnrichmentConfig;
use user_service_lib::infra::Database;

/// Fresh in-memory SQLite database with migrations applied.
///
/// A single pooled connection that never idles out keeps the in-memory
/// database alive for the whole test.
pub async fn test_database() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        idle_timeout_secs: None,
    };
    Database::connect(&config)
        .await
        .expect("in-memory database should start")
}

/// Answers the stub gives for any name: 30, male, TR.
pub fn timur_answers() -> (Value, Value, Value) {
    (
        json!({"count": 1, "age": 30}),
        json!({"count": 1, "gender": "male", "probability": 0.99}),
        json!({"count": 1, "country": [
            {"country_id": "KZ", "probability": 0.05},
            {"country_id": "TR", "probability": 0.9}
        ]}),
    )
}

/// GET route returning `body` with the queried name echoed back.
fn answer(body: Value) -> MethodRouter {
    get(move |Query(params): Query<HashMap<String, String>>| async move {
        let mut body = body;
        if let (Some(name), Some(map)) = (params.get("name"), body.as_object_mut()) {
            map.insert("name".to_string(), Value::String(name.clone()));
        }
        Json(body)
    })
}

/// Router answering `/agify`, `/genderize` and `/nationalize` with fixed JSON.
pub fn demographics_stub(age: Value, gender: Value, nationality: Value) -> Router {
    Router::new()
        .route("/agify", answer(age))
        .route("/genderize", answer(gender))
        .route("/nationalize", answer(nationality))
}

/// Stub where the gender service fails with the given status.
pub fn failing_gender_stub(status: StatusCode) -> Router {
    let (age, _, nationality) = timur_answers();
    Router::new()
        .route("/agify", answer(age))
        .route("/genderize", get(move || async move { status }))
        .route("/nationalize", answer(nationality))
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub server");
    });
    format!("http://{addr}")
}

/// Enrichment settings pointing at a stub spawned by [`spawn_stub`].
pub fn enrichment_config(base: &str, timeout: Duration) -> EnrichmentConfig {
    EnrichmentConfig {
        agify_url: format!("{base}/agify"),
        genderize_url: format!("{base}/genderize"),
        nationalize_url: format!("{base}/nationalize"),
        timeout_ms: timeout.as_millis() as u64,
    }
}
