//! # REST API for Profile Management
//!
//! Endpoints for creating, retrieving, updating, deleting and selecting
//! child profiles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tracing::{error, info};

use crate::domain::ProfileServiceError;
use crate::io::rest::mappers::profile_mapper::ProfileMapper;
use crate::io::rest::mappers::progression_mapper::ProgressionMapper;
use crate::AppState;
use shared::{CreateProfileRequest, ProfileListResponse, SelectProfileResponse, UpdateProfileRequest};

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route("/current", get(get_current_profile))
        .route(
            "/:profile_id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .route("/:profile_id/select", post(select_profile))
}

fn error_response(e: ProfileServiceError) -> Response {
    let status = match &e {
        ProfileServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ProfileServiceError::Invalid(_) => StatusCode::BAD_REQUEST,
        ProfileServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, e.to_string()).into_response()
}

/// List all profiles along with the current selection
pub async fn list_profiles(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profiles");

    let profiles = match state.profile_service.list_profiles() {
        Ok(profiles) => profiles,
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            return error_response(e);
        }
    };

    match state.profile_service.current_profile_id() {
        Ok(current_profile_id) => {
            let response = ProfileListResponse {
                profiles: ProfileMapper::to_dto_list(profiles),
                current_profile_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to read current profile: {}", e);
            error_response(e)
        }
    }
}

/// Create a new profile
pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateProfileRequest>,
) -> impl IntoResponse {
    info!("POST /api/profiles - request: {:?}", request);

    let command = ProfileMapper::to_create_command(request);
    match state.profile_service.create_profile(command) {
        Ok(profile) => {
            let message = format!("Profile created for {}", profile.kid_name);
            let response = ProfileMapper::to_profile_response(profile, message);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create profile: {}", e);
            error_response(e)
        }
    }
}

/// Get the currently selected profile
pub async fn get_current_profile(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/profiles/current");

    match state.profile_service.current_profile() {
        Ok(Some(profile)) => (StatusCode::OK, Json(ProfileMapper::to_dto(profile))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "No profile selected").into_response(),
        Err(e) => {
            error!("Failed to get current profile: {}", e);
            error_response(e)
        }
    }
}

/// Get a profile by ID
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/profiles/{}", profile_id);

    match state.profile_service.get_profile(&profile_id) {
        Ok(Some(profile)) => (StatusCode::OK, Json(ProfileMapper::to_dto(profile))).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Profile not found").into_response(),
        Err(e) => {
            error!("Failed to get profile: {}", e);
            error_response(e)
        }
    }
}

/// Update a profile's name, languages or icon
pub async fn update_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    info!("PUT /api/profiles/{} - request: {:?}", profile_id, request);

    let command = ProfileMapper::to_update_command(request);
    match state.profile_service.update_profile(&profile_id, command) {
        Ok(profile) => {
            let message = format!("Profile updated for {}", profile.kid_name);
            let response = ProfileMapper::to_profile_response(profile, message);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update profile: {}", e);
            error_response(e)
        }
    }
}

/// Delete a profile and its progression
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/profiles/{}", profile_id);

    // Held across the delete so no progression request reloads the profile in between
    let mut store = state.progression();
    match state.profile_service.delete_profile(&profile_id) {
        Ok(()) => {
            if store.active_profile() == Some(profile_id.as_str()) {
                store.unload();
            }
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!("Failed to delete profile: {}", e);
            error_response(e)
        }
    }
}

/// Make a profile current and load its progression
pub async fn select_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/profiles/{}/select", profile_id);

    let mut store = state.progression();
    match state.profile_service.select_profile(&profile_id) {
        Ok(profile) => {
            store.load_profile(&profile.id);
            let response = SelectProfileResponse {
                progression: ProgressionMapper::to_progression_response(&profile.id, &store),
                profile: ProfileMapper::to_dto(profile),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to select profile: {}", e);
            error_response(e)
        }
    }
}
