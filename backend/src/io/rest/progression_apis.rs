//! # REST API for Progression
//!
//! Levels, animal completions and stickers for one profile. Every route
//! names its profile; a request for a profile other than the loaded one
//! swaps the store over to it first.

use std::sync::MutexGuard;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::domain::models::sticker::Sticker;
use crate::domain::ProgressionStore;
use crate::io::rest::mappers::progression_mapper::ProgressionMapper;
use crate::AppState;
use shared::{
    AnimalCompletionResponse, AwardStickerRequest, AwardStickerResponse, CompleteAnimalRequest,
    ReconcileStickersRequest,
};

/// Create a router for progression related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:profile_id", get(get_progression).delete(reset_progression))
        .route("/:profile_id/reload", post(reload_progression))
        .route("/:profile_id/complete", post(complete_animal))
        .route("/:profile_id/animals/:animal_id", get(get_animal_completion))
        .route("/:profile_id/stickers", post(award_sticker))
        .route("/:profile_id/stickers/reconcile", post(reconcile_stickers))
}

/// Lock the store, check the profile exists and load it
///
/// The lock is taken before the existence check so a concurrent delete
/// cannot land between the check and the load.
fn store_for<'a>(
    state: &'a AppState,
    profile_id: &str,
) -> Result<MutexGuard<'a, ProgressionStore>, Response> {
    let mut store = state.progression();
    match state.profile_service.get_profile(profile_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err((StatusCode::NOT_FOUND, "Profile not found").into_response()),
        Err(e) => {
            error!("Failed to look up profile {}: {}", profile_id, e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Error retrieving profile").into_response());
        }
    }

    if store.active_profile() != Some(profile_id) {
        info!("Switching progression to profile {}", profile_id);
        store.load_profile(profile_id);
    }
    Ok(store)
}

/// Get the progression of a profile
pub async fn get_progression(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/progression/{}", profile_id);

    match store_for(&state, &profile_id) {
        Ok(store) => {
            let response = ProgressionMapper::to_progression_response(&profile_id, &store);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Wipe a profile's progression back to level 1
pub async fn reset_progression(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/progression/{}", profile_id);

    match store_for(&state, &profile_id) {
        Ok(mut store) => {
            store.reset_profile(&profile_id);
            let response = ProgressionMapper::to_progression_response(&profile_id, &store);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Re-read a profile's progression from storage
pub async fn reload_progression(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/progression/{}/reload", profile_id);

    match store_for(&state, &profile_id) {
        Ok(mut store) => {
            store.reload();
            let response = ProgressionMapper::to_progression_response(&profile_id, &store);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Record an animal interaction for the current level
pub async fn complete_animal(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Json(request): Json<CompleteAnimalRequest>,
) -> impl IntoResponse {
    info!("POST /api/progression/{}/complete - request: {:?}", profile_id, request);

    match store_for(&state, &profile_id) {
        Ok(mut store) => {
            let result = store.complete_animal(&request.animal_id);
            // Rejections are ordinary outcomes, reported in the body
            let response = ProgressionMapper::to_complete_response(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Whether an animal has been completed on the current level
pub async fn get_animal_completion(
    State(state): State<AppState>,
    Path((profile_id, animal_id)): Path<(String, String)>,
) -> impl IntoResponse {
    info!("GET /api/progression/{}/animals/{}", profile_id, animal_id);

    if !state.roster.contains(&animal_id) {
        return (StatusCode::NOT_FOUND, "Animal not found").into_response();
    }

    match store_for(&state, &profile_id) {
        Ok(store) => {
            let response = AnimalCompletionResponse {
                completed: store.is_animal_completed_this_level(&animal_id),
                current_level: store.current_level(),
                animal_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Award the sticker for a finished level
pub async fn award_sticker(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Json(request): Json<AwardStickerRequest>,
) -> impl IntoResponse {
    info!("POST /api/progression/{}/stickers - request: {:?}", profile_id, request);

    match store_for(&state, &profile_id) {
        Ok(mut store) => {
            let newly_added = store.award_sticker(Sticker::for_level(request.level));
            let response = AwardStickerResponse {
                newly_added,
                stickers: ProgressionMapper::sticker_list_to_dto(store.stickers()),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

/// Repair the sticker board against the levels passed so far
pub async fn reconcile_stickers(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Json(request): Json<ReconcileStickersRequest>,
) -> impl IntoResponse {
    info!("POST /api/progression/{}/stickers/reconcile - request: {:?}", profile_id, request);

    let command = ProgressionMapper::to_reconcile_command(request);
    match store_for(&state, &profile_id) {
        Ok(mut store) => {
            // Never backfill stickers for levels not yet passed
            let passed = store.current_level() - 1;
            let allowed = command.allowed_max_level.unwrap_or(passed).min(passed);
            store.reconcile_stickers(allowed, command.exclude_level);

            let response = ProgressionMapper::to_progression_response(&profile_id, &store);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_utils::TestApp;
    use crate::storage::KeyValueStore;
    use serde_json::json;

    const ROSTER: [&str; 6] = ["cow", "pig", "goat", "sheep", "hen", "horse"];

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let app = TestApp::new();

        let (status, _) = app.get("/api/progression/profile::404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = app
            .post("/api/progression/profile::404/complete", json!({ "animalId": "cow" }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(app.storage.is_empty());
    }

    #[tokio::test]
    async fn test_completing_a_level() {
        let app = TestApp::new();
        let id = app.create_profile("Asha").await;

        for animal in &ROSTER[..5] {
            let body = app.complete(&id, animal).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["levelUp"], false);
            assert_eq!(body["completedLevel"], serde_json::Value::Null);
        }

        let body = app.complete(&id, "horse").await;
        assert_eq!(body["success"], true);
        assert_eq!(body["levelUp"], true);
        assert_eq!(body["completedLevel"], 1);
        assert_eq!(body["progress"]["currentLevel"], 2);
        assert_eq!(body["progress"]["completed"], 0);
        assert_eq!(body["progress"]["total"], 6);

        let (status, progression) = app.get(&format!("/api/progression/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(progression["currentLevel"], 2);
        assert_eq!(progression["maxLevel"], 5);
        assert_eq!(progression["completedAnimals"], json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_and_unknown_completions() {
        let app = TestApp::new();
        let id = app.create_profile("Asha").await;

        app.complete(&id, "cow").await;
        let body = app.complete(&id, "cow").await;
        assert_eq!(body["success"], false);
        assert_eq!(body["levelUp"], false);
        assert_eq!(body["message"], "Animal already completed");
        assert_eq!(body["progress"]["completed"], 1);

        let body = app.complete(&id, "lion").await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unknown animal");

        let (_, cow) = app.get(&format!("/api/progression/{}/animals/cow", id)).await;
        assert_eq!(cow["completed"], true);
        let (_, pig) = app.get(&format!("/api/progression/{}/animals/pig", id)).await;
        assert_eq!(pig["completed"], false);
        let (status, _) = app.get(&format!("/api/progression/{}/animals/lion", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profiles_do_not_share_progression() {
        let app = TestApp::new();
        let asha = app.create_profile("Asha").await;
        let ravi = app.create_profile("Ravi").await;

        app.complete(&asha, "cow").await;
        app.complete(&asha, "pig").await;

        let (_, progression) = app.get(&format!("/api/progression/{}", ravi)).await;
        assert_eq!(progression["completedAnimals"], json!([]));
        let body = app.complete(&ravi, "cow").await;
        assert_eq!(body["success"], true);

        let (_, progression) = app.get(&format!("/api/progression/{}", asha)).await;
        assert_eq!(progression["completedAnimals"], json!(["cow", "pig"]));
    }

    #[tokio::test]
    async fn test_award_sticker_flow() {
        let app = TestApp::new();
        let id = app.create_profile("Asha").await;
        let uri = format!("/api/progression/{}/stickers", id);

        // Level 1 isn't passed yet
        let (_, body) = app.post(&uri, json!({ "level": 1 })).await;
        assert_eq!(body["newlyAdded"], false);

        for animal in ROSTER {
            app.complete(&id, animal).await;
        }

        let (status, body) = app.post(&uri, json!({ "level": 1 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["newlyAdded"], true);
        assert_eq!(body["stickers"], json!([{ "level": 1, "id": "farm_level1_expert" }]));

        let (_, body) = app.post(&uri, json!({ "level": 1 })).await;
        assert_eq!(body["newlyAdded"], false);
        assert_eq!(body["stickers"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reconcile_backfills_but_respects_progress() {
        let app = TestApp::new();
        let id = app.create_profile("Asha").await;
        for _ in 0..2 {
            for animal in ROSTER {
                app.complete(&id, animal).await;
            }
        }
        let uri = format!("/api/progression/{}/stickers/reconcile", id);

        let (_, body) = app.post(&uri, json!({ "excludeLevel": 2 })).await;
        assert_eq!(body["stickers"], json!([{ "level": 1, "id": "farm_level1_expert" }]));

        let (_, body) = app.post(&uri, json!({ "allowedMaxLevel": 4 })).await;
        let levels: Vec<u64> = body["stickers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["level"].as_u64().unwrap())
            .collect();
        assert_eq!(levels, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_reset_and_reload() {
        let app = TestApp::new();
        let id = app.create_profile("Asha").await;
        app.complete(&id, "cow").await;

        // Another client bumps the level behind our back
        app.storage
            .set(&format!("progression_level_{}", id), "3")
            .unwrap();
        let (status, body) = app.post(&format!("/api/progression/{}/reload", id), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentLevel"], 3);
        assert_eq!(body["stickers"].as_array().unwrap().len(), 2);

        let (status, body) = app.delete(&format!("/api/progression/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentLevel"], 1);
        assert_eq!(body["completedAnimals"], json!([]));
        assert_eq!(body["stickers"], json!([]));
        assert_eq!(app.storage.get(&format!("progression_level_{}", id)).unwrap(), None);
    }
}
