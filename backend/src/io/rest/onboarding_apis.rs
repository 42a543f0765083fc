//! # REST API for Onboarding
//!
//! Whether the first-run tooltips have been shown on this device.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::AppState;
use shared::OnboardingStatus;

/// Create a router for onboarding APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_onboarding_status)
            .post(complete_onboarding)
            .delete(reset_onboarding),
    )
}

pub async fn get_onboarding_status(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/onboarding");

    match state.onboarding_service.has_seen_onboarding() {
        Ok(has_seen_onboarding) => {
            (StatusCode::OK, Json(OnboardingStatus { has_seen_onboarding })).into_response()
        }
        Err(e) => {
            error!("Failed to read onboarding flag: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error reading onboarding status").into_response()
        }
    }
}

pub async fn complete_onboarding(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/onboarding");

    match state.onboarding_service.complete_onboarding() {
        Ok(()) => (
            StatusCode::OK,
            Json(OnboardingStatus {
                has_seen_onboarding: true,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to complete onboarding: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error saving onboarding status").into_response()
        }
    }
}

/// Show the tooltips again on the next visit
pub async fn reset_onboarding(State(state): State<AppState>) -> impl IntoResponse {
    info!("DELETE /api/onboarding");

    match state.onboarding_service.reset_onboarding() {
        Ok(()) => (
            StatusCode::OK,
            Json(OnboardingStatus {
                has_seen_onboarding: false,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to reset onboarding: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error resetting onboarding status").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::TestApp;
    use serde_json::json;

    #[tokio::test]
    async fn test_onboarding_round_trip() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/onboarding").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "hasSeenOnboarding": false }));

        let (_, body) = app.post("/api/onboarding", json!({})).await;
        assert_eq!(body["hasSeenOnboarding"], true);
        let (_, body) = app.get("/api/onboarding").await;
        assert_eq!(body["hasSeenOnboarding"], true);

        let (_, body) = app.delete("/api/onboarding").await;
        assert_eq!(body["hasSeenOnboarding"], false);
        assert!(app.storage.is_empty());
    }
}
