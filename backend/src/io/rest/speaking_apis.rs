//! # REST API for Speaking Sessions
//!
//! The UI opens a session before an animal talks and closes it when the
//! clip ends. While one is open every other animal gets 409 Conflict.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::AppState;
use shared::{BeginSpeakingRequest, SpeakingSessionResponse};

/// Create a router for speaking session APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(begin_speaking))
        .route("/:token", delete(end_speaking))
}

/// Start a speaking session for an animal
pub async fn begin_speaking(
    State(state): State<AppState>,
    Json(request): Json<BeginSpeakingRequest>,
) -> impl IntoResponse {
    info!("POST /api/speaking - request: {:?}", request);

    if !state.roster.contains(&request.animal_id) {
        return (StatusCode::NOT_FOUND, "Animal not found").into_response();
    }

    match state.speaking_gate.begin(&request.animal_id) {
        Ok(session) => {
            let response = SpeakingSessionResponse {
                token: session.token.to_string(),
                animal_id: session.animal_id,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Speaking request refused: {}", e);
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
    }
}

/// End a speaking session
pub async fn end_speaking(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> impl IntoResponse {
    info!("DELETE /api/speaking/{}", token);

    if state.speaking_gate.end(token) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, "No such speaking session").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::TestApp;
    use serde_json::json;

    #[tokio::test]
    async fn test_one_animal_speaks_at_a_time() {
        let app = TestApp::new();

        let (status, session) = app.post("/api/speaking", json!({ "animalId": "cow" })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(session["animalId"], "cow");
        let token = session["token"].as_str().unwrap().to_string();

        let (status, _) = app.post("/api/speaking", json!({ "animalId": "pig" })).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app.delete(&format!("/api/speaking/{}", token)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.delete(&format!("/api/speaking/{}", token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.post("/api/speaking", json!({ "animalId": "pig" })).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(app.state.speaking_gate.current(), Some("pig".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_animal_and_bad_token() {
        let app = TestApp::new();

        let (status, _) = app.post("/api/speaking", json!({ "animalId": "lion" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(app.state.speaking_gate.current(), None);

        let (status, _) = app.delete("/api/speaking/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
