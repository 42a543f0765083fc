//! # REST API Interface Layer
//!
//! HTTP endpoints for My Talking Animals, nested under `/api`.
//!
//! - `/profiles`: create, list, update, delete and select profiles
//! - `/progression/:profile_id`: levels, completions and stickers of one profile
//! - `/roster`: the animals and their voice clips
//! - `/speaking`: one-animal-at-a-time sessions
//! - `/onboarding`: the first-run flag
//!
//! Progression routes always name the profile they act on. The store loads
//! that profile on demand, so two tabs pointing at different profiles never
//! see each other's state.

use axum::Router;

use crate::AppState;

pub mod mappers;
pub mod onboarding_apis;
pub mod profile_apis;
pub mod progression_apis;
pub mod roster_apis;
pub mod speaking_apis;

#[cfg(test)]
pub(crate) mod test_utils;

/// Create a router for every API resource
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/profiles", profile_apis::router())
        .nest("/progression", progression_apis::router())
        .nest("/roster", roster_apis::router())
        .nest("/speaking", speaking_apis::router())
        .nest("/onboarding", onboarding_apis::router())
}
