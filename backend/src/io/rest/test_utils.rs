//! Helpers for driving the router in handler tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::domain::{Roster, DEFAULT_MAX_LEVEL};
use crate::storage::MemoryKeyValueStore;
use crate::{create_router, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub storage: MemoryKeyValueStore,
}

impl TestApp {
    pub fn new() -> Self {
        let storage = MemoryKeyValueStore::new();
        let state = AppState::new(
            Arc::new(storage.clone()),
            Arc::new(Roster::farm()),
            DEFAULT_MAX_LEVEL,
        );
        let router = create_router(state.clone(), "http://localhost:8080", None)
            .expect("test router");

        Self {
            router,
            state,
            storage,
        }
    }

    /// Send a request and decode the body as JSON (plain text comes back as a string)
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create an English-primary profile and return its id
    pub async fn create_profile(&self, kid_name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/profiles",
                json!({
                    "kidName": kid_name,
                    "primaryLanguage": "English",
                    "secondaryLanguage": "Hindi"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["profile"]["id"].as_str().expect("profile id").to_string()
    }

    pub async fn complete(&self, profile_id: &str, animal_id: &str) -> Value {
        let (status, body) = self
            .post(
                &format!("/api/progression/{}/complete", profile_id),
                json!({ "animalId": animal_id }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }
}
