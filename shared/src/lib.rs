use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages a child can learn in. Serialized by display name ("English", "Hindi").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    /// Short code used by voice clip directions ("en", "hi")
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    /// Parse either a display name or a short code, case-insensitive
    pub fn parse(value: &str) -> Option<Language> {
        match value.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Language::English),
            "hindi" | "hi" => Some(Language::Hindi),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Hindi => write!(f, "Hindi"),
        }
    }
}

/// A child's save slot
///
/// ID format: "profile::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub kid_name: String,
    pub primary_language: Language,
    pub secondary_language: Language,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    pub icon: String,
}

impl Profile {
    /// Generate a profile ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("profile::{}", epoch_millis)
    }

    /// Parse a profile ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, ProfileIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "profile" {
            return Err(ProfileIdError::InvalidFormat);
        }

        parts[1].parse::<u64>().map_err(|_| ProfileIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for ProfileIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIdError::InvalidFormat => write!(f, "Invalid profile ID format"),
            ProfileIdError::InvalidTimestamp => write!(f, "Invalid timestamp in profile ID"),
        }
    }
}

impl std::error::Error for ProfileIdError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub kid_name: String,
    pub primary_language: Language,
    pub secondary_language: Language,
    /// Display icon, defaults to a cow when omitted
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub kid_name: Option<String>,
    pub primary_language: Option<Language>,
    pub secondary_language: Option<Language>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub profiles: Vec<Profile>,
    pub current_profile_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectProfileResponse {
    pub profile: Profile,
    pub progression: ProgressionResponse,
}

/// A level-completion reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sticker {
    pub level: u32,
    /// Display identifier, e.g. "farm_level1_expert"
    pub id: String,
}

/// Completion count for the level in progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub completed: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub current_level: u32,
    pub completed: usize,
    pub total: usize,
}

/// Full progression view for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionResponse {
    pub profile_id: String,
    pub current_level: u32,
    pub max_level: u32,
    pub completed_animals: Vec<String>,
    pub stickers: Vec<Sticker>,
    pub level_progress: LevelProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAnimalRequest {
    pub animal_id: String,
}

/// Outcome of completing an animal.
///
/// `success: false` is a normal outcome (already completed or unknown animal);
/// `message` says which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAnimalResponse {
    pub success: bool,
    pub level_up: bool,
    /// Level that was just finished, only set on level-up
    pub completed_level: Option<u32>,
    pub message: Option<String>,
    pub progress: ProgressSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalCompletionResponse {
    pub animal_id: String,
    pub completed: bool,
    pub current_level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardStickerRequest {
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardStickerResponse {
    pub newly_added: bool,
    pub stickers: Vec<Sticker>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileStickersRequest {
    /// Defaults to the last level the profile has passed
    pub allowed_max_level: Option<u32>,
    /// Level whose award animation is still playing; left untouched
    pub exclude_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceClip {
    pub level: u32,
    /// "en-hi" or "hi-en"
    pub direction: String,
    pub voice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    pub names: Vec<AnimalName>,
    pub sprite: Option<String>,
    pub sound: Option<String>,
    pub levels: Vec<VoiceClip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalName {
    pub language: Language,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub animals: Vec<Animal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceClipResponse {
    pub animal_id: String,
    pub voice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginSpeakingRequest {
    pub animal_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingSessionResponse {
    pub token: String,
    pub animal_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    pub has_seen_onboarding: bool,
}
