//! # Talking Animals Backend
//!
//! Contains all non-UI logic for My Talking Animals.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: progression rules, profiles, the roster and the speaking gate
//! - **Storage**: the key-value store progression is persisted to
//! - **IO**: the REST API the game UI talks to
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (web frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (progression store, services)
//!     ↓
//! Storage Layer (key-value files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::{OnboardingService, ProfileService, ProgressionStore, Roster, SpeakingGate};
use crate::storage::{FileConnection, FileKeyValueStore, KeyValueStore};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub progression: Arc<Mutex<ProgressionStore>>,
    pub profile_service: ProfileService,
    pub onboarding_service: OnboardingService,
    pub speaking_gate: SpeakingGate,
    pub roster: Arc<Roster>,
}

impl AppState {
    pub fn new(storage: Arc<dyn KeyValueStore>, roster: Arc<Roster>, max_level: u32) -> Self {
        Self {
            progression: Arc::new(Mutex::new(ProgressionStore::new(
                storage.clone(),
                roster.clone(),
                max_level,
            ))),
            profile_service: ProfileService::new(storage.clone()),
            onboarding_service: OnboardingService::new(storage),
            speaking_gate: SpeakingGate::new(),
            roster,
        }
    }

    /// Lock the progression store, recovering from a poisoned lock
    pub fn progression(&self) -> MutexGuard<'_, ProgressionStore> {
        self.progression
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let data_directory = config.resolved_data_directory()?;
    let connection = FileConnection::new(&data_directory)
        .with_context(|| format!("Failed to open data directory {}", data_directory.display()))?;
    info!("Using data directory: {}", connection.base_directory().display());
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(connection));

    info!("Setting up roster");
    let roster = match &config.roster_path {
        Some(path) => Roster::from_file(path)?,
        None => Roster::farm(),
    };

    info!("Setting up application state");
    let state = AppState::new(storage, Arc::new(roster), config.max_level);

    // Pick up where the last session left off
    match state.profile_service.current_profile() {
        Ok(Some(profile)) => {
            state.progression().load_profile(&profile.id);
        }
        Ok(None) => info!("No current profile yet"),
        Err(e) => warn!("Could not read the current profile: {}", e),
    }

    Ok(state)
}

/// Create the Axum router with all routes configured
pub fn create_router(
    app_state: AppState,
    allowed_origin: &str,
    static_directory: Option<&Path>,
) -> Result<Router> {
    // CORS setup to allow frontend to make requests
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = io::rest::router();

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = static_directory {
        info!("Serving frontend from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router.layer(cors).with_state(app_state))
}
