use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::commands::profile::{CreateProfileCommand, UpdateProfileCommand};
use super::keys::{ProgressionKeys, CURRENT_PROFILE_KEY, PROFILES_KEY};
use super::models::profile::{
    validate_icon, validate_kid_name, validate_languages, DomainProfile, ProfileValidationError,
    DEFAULT_PROFILE_ICON,
};
use crate::storage::KeyValueStore;
use shared::Profile;

#[derive(Debug, thiserror::Error)]
pub enum ProfileServiceError {
    #[error("Profile not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ProfileValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ProfileResult<T> = Result<T, ProfileServiceError>;

/// Service for managing child profiles and the current-profile pointer
#[derive(Clone)]
pub struct ProfileService {
    storage: Arc<dyn KeyValueStore>,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Create a new profile
    pub fn create_profile(&self, command: CreateProfileCommand) -> ProfileResult<DomainProfile> {
        info!(
            "Creating profile: name={}, languages={}/{}",
            command.kid_name, command.primary_language, command.secondary_language
        );

        validate_kid_name(&command.kid_name)?;
        validate_languages(command.primary_language, command.secondary_language)?;
        let icon = command
            .icon
            .map(|icon| icon.trim().to_string())
            .unwrap_or_else(|| DEFAULT_PROFILE_ICON.to_string());
        validate_icon(&icon)?;

        let mut profiles = self.load_profiles()?;

        let now = Utc::now();
        let mut timestamp_millis = now.timestamp_millis().max(0) as u64;
        while profiles
            .iter()
            .any(|p| p.id == Profile::generate_id(timestamp_millis))
        {
            timestamp_millis += 1;
        }

        let profile = DomainProfile {
            id: Profile::generate_id(timestamp_millis),
            kid_name: command.kid_name.trim().to_string(),
            primary_language: command.primary_language,
            secondary_language: command.secondary_language,
            created_at: now.to_rfc3339(),
            icon,
        };

        profiles.push(profile.clone());
        self.save_profiles(&profiles)?;

        info!("Created profile: {} with ID: {}", profile.kid_name, profile.id);
        Ok(profile)
    }

    /// Get a profile by ID
    pub fn get_profile(&self, profile_id: &str) -> ProfileResult<Option<DomainProfile>> {
        let profiles = self.load_profiles()?;
        Ok(profiles.into_iter().find(|p| p.id == profile_id))
    }

    /// List all profiles in creation order
    pub fn list_profiles(&self) -> ProfileResult<Vec<DomainProfile>> {
        let mut profiles = self.load_profiles()?;
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(profiles)
    }

    /// Update an existing profile. Nothing changes if any field is invalid.
    pub fn update_profile(
        &self,
        profile_id: &str,
        command: UpdateProfileCommand,
    ) -> ProfileResult<DomainProfile> {
        info!("Updating profile: {}", profile_id);

        let mut profiles = self.load_profiles()?;
        let index = profiles
            .iter()
            .position(|p| p.id == profile_id)
            .ok_or_else(|| ProfileServiceError::NotFound(profile_id.to_string()))?;

        let mut updated = profiles[index].clone();
        if let Some(name) = command.kid_name {
            validate_kid_name(&name)?;
            updated.kid_name = name.trim().to_string();
        }
        if let Some(primary) = command.primary_language {
            updated.primary_language = primary;
        }
        if let Some(secondary) = command.secondary_language {
            updated.secondary_language = secondary;
        }
        if let Some(icon) = command.icon {
            let icon = icon.trim().to_string();
            validate_icon(&icon)?;
            updated.icon = icon;
        }
        validate_languages(updated.primary_language, updated.secondary_language)?;

        profiles[index] = updated.clone();
        self.save_profiles(&profiles)?;

        // Keep the current-profile record in step
        if self.current_profile_id()?.as_deref() == Some(profile_id) {
            self.write_current(&updated)?;
        }

        info!("Updated profile: {} with ID: {}", updated.kid_name, updated.id);
        Ok(updated)
    }

    /// Delete a profile along with its progression
    pub fn delete_profile(&self, profile_id: &str) -> ProfileResult<()> {
        info!("Deleting profile: {}", profile_id);

        let mut profiles = self.load_profiles()?;
        let before = profiles.len();
        profiles.retain(|p| p.id != profile_id);
        if profiles.len() == before {
            return Err(ProfileServiceError::NotFound(profile_id.to_string()));
        }
        self.save_profiles(&profiles)?;

        if self.current_profile_id()?.as_deref() == Some(profile_id) {
            self.clear_current_profile()?;
        }

        for key in ProgressionKeys::for_profile(profile_id).all() {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove {} for deleted profile: {}", key, e);
            }
        }

        info!("Deleted profile: {}", profile_id);
        Ok(())
    }

    /// Make a profile the current one
    pub fn select_profile(&self, profile_id: &str) -> ProfileResult<DomainProfile> {
        let profile = self
            .get_profile(profile_id)?
            .ok_or_else(|| ProfileServiceError::NotFound(profile_id.to_string()))?;

        self.write_current(&profile)?;
        info!("Selected profile: {} ({})", profile.kid_name, profile.id);
        Ok(profile)
    }

    /// The currently selected profile, if any
    pub fn current_profile(&self) -> ProfileResult<Option<DomainProfile>> {
        let Some(raw) = self.storage.get(CURRENT_PROFILE_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<DomainProfile>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Malformed current profile record: {}. Treating as none.", e);
                Ok(None)
            }
        }
    }

    pub fn current_profile_id(&self) -> ProfileResult<Option<String>> {
        Ok(self.current_profile()?.map(|p| p.id))
    }

    pub fn clear_current_profile(&self) -> ProfileResult<()> {
        self.storage.remove(CURRENT_PROFILE_KEY)?;
        info!("Cleared current profile");
        Ok(())
    }

    fn write_current(&self, profile: &DomainProfile) -> ProfileResult<()> {
        let json = serde_json::to_string(profile).map_err(anyhow::Error::from)?;
        self.storage.set(CURRENT_PROFILE_KEY, &json)?;
        Ok(())
    }

    fn load_profiles(&self) -> ProfileResult<Vec<DomainProfile>> {
        let Some(raw) = self.storage.get(PROFILES_KEY)? else {
            return Ok(Vec::new());
        };

        let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!("Malformed profile list: {}. Treating as empty.", e);
                return Ok(Vec::new());
            }
        };

        // Skip individual records that no longer parse instead of losing the list
        let profiles = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<DomainProfile>(value) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!("Skipping malformed profile record: {}", e);
                    None
                }
            })
            .collect();

        Ok(profiles)
    }

    fn save_profiles(&self, profiles: &[DomainProfile]) -> ProfileResult<()> {
        let json = serde_json::to_string(profiles).map_err(anyhow::Error::from)?;
        self.storage.set(PROFILES_KEY, &json)?;
        Ok(())
    }
}
