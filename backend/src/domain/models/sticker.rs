use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward for finishing every animal on one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sticker {
    pub level: u32,
}

impl Sticker {
    pub fn for_level(level: u32) -> Self {
        Self { level }
    }

    /// Display identifier shown by the sticker board, e.g. "farm_level2_expert"
    pub fn id(&self) -> String {
        format!("farm_level{}_expert", self.level)
    }

    /// Read an identifier written by older versions of the game.
    ///
    /// Only level stickers are recognised; anything else (such as the
    /// per-animal "cow_expert") yields `None`.
    pub fn from_legacy_id(id: &str) -> Option<Self> {
        let level = id.strip_prefix("farm_level")?.strip_suffix("_expert")?;
        if level.is_empty() || !level.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        level.parse().ok().filter(|level| *level > 0).map(Self::for_level)
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// One entry of a persisted sticker array: either the current `{ "level": N }`
/// record or an identifier string from before stickers were structured.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PersistedSticker {
    Record(Sticker),
    Legacy(String),
}
