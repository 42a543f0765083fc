//! The fixed set of animals a level is made of.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use shared::Language;
use tracing::info;

use super::models::animal::{AnimalRecord, Direction, LevelVoice};

/// Farm animals in display order
pub const FARM_ANIMALS: [(&str, &str, &str); 6] = [
    ("cow", "Cow", "Gaay"),
    ("pig", "Pig", "Suar"),
    ("goat", "Goat", "Bakri"),
    ("sheep", "Sheep", "Bhed"),
    ("hen", "Hen", "Murgi"),
    ("horse", "Horse", "Ghoda"),
];

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Failed to read roster file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Roster is not an array of animal records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Roster must contain at least one animal")]
    Empty,
    #[error("Animal id cannot be empty")]
    EmptyId,
    #[error("Duplicate animal id in roster: {0}")]
    DuplicateId(String),
}

/// Read-only roster of animals, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    animals: Vec<AnimalRecord>,
}

impl Roster {
    pub fn new(animals: Vec<AnimalRecord>) -> Result<Self, RosterError> {
        if animals.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen = HashSet::new();
        for animal in &animals {
            if animal.id.trim().is_empty() {
                return Err(RosterError::EmptyId);
            }
            if !seen.insert(animal.id.as_str()) {
                return Err(RosterError::DuplicateId(animal.id.clone()));
            }
        }

        Ok(Self { animals })
    }

    /// The built-in farm: cow, pig, goat, sheep, hen, horse
    ///
    /// Only level 1 ships voice clips, in both directions. Later levels need
    /// a roster file.
    pub fn farm() -> Self {
        let animals = FARM_ANIMALS
            .iter()
            .map(|(id, english, hindi)| AnimalRecord {
                id: id.to_string(),
                name: BTreeMap::from([
                    ("en".to_string(), english.to_string()),
                    ("hi".to_string(), hindi.to_string()),
                ]),
                sprite: Some(format!("/animals/{}/{}_idle.png", id, id)),
                sound: Some(format!("/animals/{}/{}.mp3", id, id)),
                levels: [Direction::EnglishToHindi, Direction::HindiToEnglish]
                    .into_iter()
                    .map(|direction| LevelVoice {
                        id: 1,
                        direction,
                        voice: format!(
                            "/animals/{}/{}_level1_{}.mp3",
                            id,
                            id,
                            direction.as_str().replace('-', "_")
                        ),
                    })
                    .collect(),
            })
            .collect();

        Self { animals }
    }

    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let animals: Vec<AnimalRecord> = serde_json::from_str(json)?;
        Self::new(animals)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RosterError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let roster = Self::from_json(&json)?;
        info!("Loaded roster of {} animals from {}", roster.len(), path.display());
        Ok(roster)
    }

    pub fn animals(&self) -> &[AnimalRecord] {
        &self.animals
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.animals.iter().map(|animal| animal.id.as_str())
    }

    pub fn contains(&self, animal_id: &str) -> bool {
        self.animals.iter().any(|animal| animal.id == animal_id)
    }

    pub fn animal(&self, animal_id: &str) -> Option<&AnimalRecord> {
        self.animals.iter().find(|animal| animal.id == animal_id)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Voice clip an animal plays at `level` for a child whose primary language is `language`
    pub fn voice_clip(&self, animal_id: &str, level: u32, language: Language) -> Option<&str> {
        self.animal(animal_id)?
            .voice_for(level, Direction::for_primary(language))
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::farm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_farm_roster() {
        let roster = Roster::farm();
        assert_eq!(roster.len(), 6);
        assert_eq!(
            roster.ids().collect::<Vec<_>>(),
            vec!["cow", "pig", "goat", "sheep", "hen", "horse"]
        );
        assert!(roster.contains("hen"));
        assert!(!roster.contains("lion"));
        assert_eq!(
            roster.animal("horse").and_then(|a| a.display_name(Language::Hindi)),
            Some("Ghoda")
        );
    }

    #[test]
    fn test_farm_ships_level_one_clips() {
        let roster = Roster::farm();
        assert_eq!(
            roster.voice_clip("horse", 1, Language::English),
            Some("/animals/horse/horse_level1_en_hi.mp3")
        );
        assert_eq!(
            roster.voice_clip("cow", 1, Language::Hindi),
            Some("/animals/cow/cow_level1_hi_en.mp3")
        );
        assert_eq!(roster.voice_clip("cow", 2, Language::English), None);
    }

    #[test]
    fn test_from_json_rejects_bad_rosters() {
        assert!(matches!(Roster::from_json("[]"), Err(RosterError::Empty)));
        assert!(matches!(Roster::from_json(r#"{"id":"cow"}"#), Err(RosterError::Parse(_))));
        assert!(matches!(
            Roster::from_json(r#"[{"id":"cow"},{"id":"cow"}]"#),
            Err(RosterError::DuplicateId(id)) if id == "cow"
        ));
        assert!(matches!(Roster::from_json(r#"[{"id":" "}]"#), Err(RosterError::EmptyId)));
    }

    #[test]
    fn test_voice_clip_lookup() {
        let roster = Roster::from_json(
            r#"[{
                "id": "pig",
                "levels": [
                    { "id": 2, "direction": "en-hi", "voice": "/voices/pig_2_en_hi.mp3" },
                    { "id": 2, "direction": "hi-en", "voice": "/voices/pig_2_hi_en.mp3" }
                ]
            }]"#,
        )
        .unwrap();

        assert_eq!(
            roster.voice_clip("pig", 2, Language::English),
            Some("/voices/pig_2_en_hi.mp3")
        );
        assert_eq!(
            roster.voice_clip("pig", 2, Language::Hindi),
            Some("/voices/pig_2_hi_en.mp3")
        );
        assert_eq!(roster.voice_clip("pig", 3, Language::Hindi), None);
        assert_eq!(roster.voice_clip("cow", 2, Language::Hindi), None);
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("farm.json");
        fs::write(&path, r#"[{"id":"cow"},{"id":"hen"}]"#).unwrap();

        let roster = Roster::from_file(&path).unwrap();
        assert_eq!(roster.ids().collect::<Vec<_>>(), vec!["cow", "hen"]);

        assert!(matches!(
            Roster::from_file(temp_dir.path().join("missing.json")),
            Err(RosterError::Read { .. })
        ));
    }
}
