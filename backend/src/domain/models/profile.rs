use serde::{Deserialize, Serialize};
use shared::Language;

pub const DEFAULT_PROFILE_ICON: &str = "🐮";
pub const MAX_KID_NAME_LENGTH: usize = 50;
pub const MAX_ICON_LENGTH: usize = 16;

/// A child's save slot as persisted under the `profiles` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainProfile {
    pub id: String,
    pub kid_name: String,
    pub primary_language: Language,
    pub secondary_language: Language,
    pub created_at: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    DEFAULT_PROFILE_ICON.to_string()
}

impl DomainProfile {
    /// Check every invariant a stored profile must hold
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        validate_kid_name(&self.kid_name)?;
        validate_languages(self.primary_language, self.secondary_language)?;
        validate_icon(&self.icon)
    }
}

pub fn validate_kid_name(name: &str) -> Result<(), ProfileValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_KID_NAME_LENGTH {
        return Err(ProfileValidationError::NameTooLong);
    }
    Ok(())
}

pub fn validate_languages(primary: Language, secondary: Language) -> Result<(), ProfileValidationError> {
    if primary == secondary {
        return Err(ProfileValidationError::SameLanguages(primary));
    }
    Ok(())
}

pub fn validate_icon(icon: &str) -> Result<(), ProfileValidationError> {
    if icon.trim().is_empty() {
        return Err(ProfileValidationError::EmptyIcon);
    }
    if icon.chars().count() > MAX_ICON_LENGTH {
        return Err(ProfileValidationError::IconTooLong);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("Child name cannot be empty")]
    EmptyName,
    #[error("Child name cannot exceed 50 characters")]
    NameTooLong,
    #[error("Primary and secondary language must differ (both are {0})")]
    SameLanguages(Language),
    #[error("Icon cannot be empty")]
    EmptyIcon,
    #[error("Icon is too long")]
    IconTooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_kid_name() {
        assert!(validate_kid_name("Asha").is_ok());
        assert_eq!(validate_kid_name("   "), Err(ProfileValidationError::EmptyName));
        assert!(validate_kid_name(&"a".repeat(50)).is_ok());
        assert_eq!(validate_kid_name(&"a".repeat(51)), Err(ProfileValidationError::NameTooLong));
    }

    #[test]
    fn test_validate_languages() {
        assert!(validate_languages(Language::English, Language::Hindi).is_ok());
        assert_eq!(
            validate_languages(Language::Hindi, Language::Hindi),
            Err(ProfileValidationError::SameLanguages(Language::Hindi))
        );
    }

    #[test]
    fn test_missing_icon_defaults_when_reading_old_records() {
        let profile: DomainProfile = serde_json::from_str(
            r#"{"id":"profile::1","kidName":"Ravi","primaryLanguage":"Hindi","secondaryLanguage":"English","createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(profile.icon, DEFAULT_PROFILE_ICON);
        assert!(profile.validate().is_ok());
    }
}
