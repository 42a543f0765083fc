//! Key layout inside the key-value store.

pub const PROFILES_KEY: &str = "profiles";
pub const CURRENT_PROFILE_KEY: &str = "currentProfile";
pub const ONBOARDING_SEEN_KEY: &str = "my-talking-animals-onboarding-seen";

/// Unscoped keys written before progression was tracked per profile
pub const LEGACY_LEVEL_KEY: &str = "progression_level";
pub const LEGACY_COMPLETED_KEY: &str = "progression_completed";
pub const LEGACY_STICKERS_KEY: &str = "progression_stickers";

/// The three keys holding one profile's progression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionKeys {
    pub level: String,
    pub completed: String,
    pub stickers: String,
}

impl ProgressionKeys {
    pub fn for_profile(profile_id: &str) -> Self {
        Self {
            level: format!("{}_{}", LEGACY_LEVEL_KEY, profile_id),
            completed: format!("{}_{}", LEGACY_COMPLETED_KEY, profile_id),
            stickers: format!("{}_{}", LEGACY_STICKERS_KEY, profile_id),
        }
    }

    pub fn legacy() -> Self {
        Self {
            level: LEGACY_LEVEL_KEY.to_string(),
            completed: LEGACY_COMPLETED_KEY.to_string(),
            stickers: LEGACY_STICKERS_KEY.to_string(),
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [&self.level, &self.completed, &self.stickers]
    }
}
