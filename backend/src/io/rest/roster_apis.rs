//! # REST API for the Roster
//!
//! The animals on the farm and the voice clip each one plays per level.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::io::rest::mappers::roster_mapper::RosterMapper;
use crate::AppState;
use shared::{Language, VoiceClipResponse};

/// Create a router for roster related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roster))
        .route("/:animal_id/voice", get(get_voice_clip))
}

#[derive(Debug, Deserialize)]
pub struct VoiceClipQuery {
    pub level: u32,
    /// Child's primary language, as a name or short code
    pub language: String,
}

/// List every animal in display order
pub async fn get_roster(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/roster");
    (StatusCode::OK, Json(RosterMapper::to_roster_response(&state.roster)))
}

/// Look up the clip an animal plays for a level and primary language
pub async fn get_voice_clip(
    State(state): State<AppState>,
    Path(animal_id): Path<String>,
    Query(query): Query<VoiceClipQuery>,
) -> impl IntoResponse {
    info!("GET /api/roster/{}/voice - query: {:?}", animal_id, query);

    let Some(language) = Language::parse(&query.language) else {
        warn!("Unsupported language: {}", query.language);
        return (StatusCode::BAD_REQUEST, "Unsupported language").into_response();
    };

    if !state.roster.contains(&animal_id) {
        return (StatusCode::NOT_FOUND, "Animal not found").into_response();
    }

    let response = VoiceClipResponse {
        voice: state
            .roster
            .voice_clip(&animal_id, query.level, language)
            .map(str::to_string),
        animal_id,
    };
    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::TestApp;

    #[tokio::test]
    async fn test_get_roster() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/roster").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["animals"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["cow", "pig", "goat", "sheep", "hen", "horse"]);
    }

    #[tokio::test]
    async fn test_voice_clip_lookup_errors() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/roster/cow/voice?level=1&language=en").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["animalId"], "cow");
        assert_eq!(body["voice"], "/animals/cow/cow_level1_en_hi.mp3");

        // Known animal without a clip for the level
        let (status, body) = app.get("/api/roster/cow/voice?level=2&language=hi").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["voice"], serde_json::Value::Null);

        let (status, _) = app.get("/api/roster/cow/voice?level=1&language=fr").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = app.get("/api/roster/lion/voice?level=1&language=hi").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
