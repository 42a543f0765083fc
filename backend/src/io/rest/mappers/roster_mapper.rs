use shared::{Animal, AnimalName, Language, RosterResponse, VoiceClip};

use crate::domain::models::animal::AnimalRecord;
use crate::domain::Roster;

pub struct RosterMapper;

impl RosterMapper {
    pub fn to_dto(record: &AnimalRecord) -> Animal {
        Animal {
            id: record.id.clone(),
            // Names in languages the game doesn't offer are not sent
            names: record
                .name
                .iter()
                .filter_map(|(code, name)| {
                    Language::parse(code).map(|language| AnimalName {
                        language,
                        name: name.clone(),
                    })
                })
                .collect(),
            sprite: record.sprite.clone(),
            sound: record.sound.clone(),
            levels: record
                .levels
                .iter()
                .map(|clip| VoiceClip {
                    level: clip.id,
                    direction: clip.direction.as_str().to_string(),
                    voice: clip.voice.clone(),
                })
                .collect(),
        }
    }

    pub fn to_roster_response(roster: &Roster) -> RosterResponse {
        RosterResponse {
            animals: roster.animals().iter().map(Self::to_dto).collect(),
        }
    }
}
