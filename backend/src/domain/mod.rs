//! # Domain Module
//!
//! Contains all game rules for My Talking Animals.
//!
//! This module decides how a child moves through the levels and what they
//! earn on the way. It operates independently of HTTP and of where the data
//! is stored.
//!
//! ## Module Organization
//!
//! - **progression_store**: levels, completed animals and stickers for the loaded profile
//! - **profile_service**: the profile collection and the current-profile pointer
//! - **roster**: the animals that make up a level, plus voice clip lookup
//! - **speaking_gate**: lets one animal speak at a time
//! - **onboarding_service**: the first-run flag
//!
//! ## Core Concepts
//!
//! - **Roster**: the fixed set of animals the game supports
//! - **Level**: finished by completing every roster animal once
//! - **Completion**: the first interaction with an animal within a level
//! - **Sticker**: one reward per finished level
//! - **Profile**: a child's save slot with independent progression
//!
//! ## Rules
//!
//! - Levels start at 1 and never go past the configured maximum
//! - The completed set empties in the same step the level goes up
//! - Completing an animal twice within a level changes nothing
//! - A profile's primary and secondary language always differ
//! - Loading a profile replaces all progression state; profiles never mix

pub mod commands;
pub mod keys;
pub mod models;
pub mod onboarding_service;
pub mod profile_service;
pub mod progression_store;
pub mod roster;
pub mod speaking_gate;

pub use onboarding_service::OnboardingService;
pub use profile_service::{ProfileResult, ProfileService, ProfileServiceError};
pub use progression_store::{ProgressionStore, DEFAULT_MAX_LEVEL};
pub use roster::{Roster, RosterError};
pub use speaking_gate::{SpeakingError, SpeakingGate, SpeakingGuard, SpeakingSession};
