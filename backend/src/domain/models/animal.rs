use serde::{Deserialize, Serialize};
use shared::Language;
use std::collections::BTreeMap;

/// Which way a voice clip translates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "en-hi")]
    EnglishToHindi,
    #[serde(rename = "hi-en")]
    HindiToEnglish,
}

impl Direction {
    /// Clips play from the child's primary language into the other one
    pub fn for_primary(language: Language) -> Self {
        match language {
            Language::English => Direction::EnglishToHindi,
            Language::Hindi => Direction::HindiToEnglish,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::EnglishToHindi => "en-hi",
            Direction::HindiToEnglish => "hi-en",
        }
    }
}

/// One voice clip of an animal, per level and direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelVoice {
    /// Level number
    pub id: u32,
    pub direction: Direction,
    pub voice: String,
}

/// An animal record from the roster file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: String,
    /// Display name keyed by language code ("en", "hi")
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    #[serde(default)]
    pub sprite: Option<String>,
    #[serde(default)]
    pub sound: Option<String>,
    #[serde(default)]
    pub levels: Vec<LevelVoice>,
}

impl AnimalRecord {
    pub fn display_name(&self, language: Language) -> Option<&str> {
        self.name.get(language.code()).map(String::as_str)
    }

    pub fn voice_for(&self, level: u32, direction: Direction) -> Option<&str> {
        self.levels
            .iter()
            .find(|clip| clip.id == level && clip.direction == direction)
            .map(|clip| clip.voice.as_str())
    }
}
