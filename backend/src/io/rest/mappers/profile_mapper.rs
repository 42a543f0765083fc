use shared::{CreateProfileRequest, Profile, ProfileResponse, UpdateProfileRequest};

use crate::domain::commands::profile::{CreateProfileCommand, UpdateProfileCommand};
use crate::domain::models::profile::DomainProfile;

pub struct ProfileMapper;

impl ProfileMapper {
    /// Convert domain DomainProfile to shared Profile DTO
    pub fn to_dto(domain: DomainProfile) -> Profile {
        Profile {
            id: domain.id,
            kid_name: domain.kid_name,
            primary_language: domain.primary_language,
            secondary_language: domain.secondary_language,
            created_at: domain.created_at,
            icon: domain.icon,
        }
    }

    pub fn to_dto_list(domain_profiles: Vec<DomainProfile>) -> Vec<Profile> {
        domain_profiles.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(request: CreateProfileRequest) -> CreateProfileCommand {
        CreateProfileCommand {
            kid_name: request.kid_name,
            primary_language: request.primary_language,
            secondary_language: request.secondary_language,
            icon: request.icon,
        }
    }

    pub fn to_update_command(request: UpdateProfileRequest) -> UpdateProfileCommand {
        UpdateProfileCommand {
            kid_name: request.kid_name,
            primary_language: request.primary_language,
            secondary_language: request.secondary_language,
            icon: request.icon,
        }
    }

    pub fn to_profile_response(domain: DomainProfile, success_message: String) -> ProfileResponse {
        ProfileResponse {
            profile: Self::to_dto(domain),
            success_message,
        }
    }
}
