//! # Progression Store
//!
//! Single source of truth for one profile's level, completed animals and
//! stickers.
//!
//! A level is finished when every animal of the roster has been completed
//! once. Finishing a level below the cap moves the profile to the next level
//! and empties the completed set in the same step. At the cap the completed
//! set fills up and stays full.
//!
//! The store only reports level-ups; awarding the sticker for a finished
//! level is a separate call made by the UI once its reward animation runs.
//!
//! Persistence is best effort. Every operation applies to the in-memory state
//! first; a failed write is logged and the session carries on. Nothing is
//! written until a profile has been loaded, so an uninitialised store can
//! never overwrite saved progress with defaults.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::keys::ProgressionKeys;
use super::models::progression::{
    CompletionRejection, CompletionResult, LevelProgress, ProgressSnapshot, ProgressionState,
};
use super::models::sticker::{PersistedSticker, Sticker};
use super::roster::Roster;
use crate::storage::KeyValueStore;

pub const DEFAULT_MAX_LEVEL: u32 = 5;

pub struct ProgressionStore {
    storage: Arc<dyn KeyValueStore>,
    roster: Arc<Roster>,
    max_level: u32,
    /// Profile whose state is loaded; writes are gated on this
    active_profile: Option<String>,
    state: ProgressionState,
}

impl ProgressionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, roster: Arc<Roster>, max_level: u32) -> Self {
        Self {
            storage,
            roster,
            max_level: max_level.max(1),
            active_profile: None,
            state: ProgressionState::default(),
        }
    }

    /// Load a profile's progression, replacing whatever was loaded before
    pub fn load_profile(&mut self, profile_id: &str) -> ProgressionState {
        let keys = ProgressionKeys::for_profile(profile_id);

        let (state, migrated) = match self.read_state(&keys) {
            Some(state) => (state, false),
            None => match self.read_state(&ProgressionKeys::legacy()) {
                Some(state) => {
                    info!("Adopting unscoped progression data for profile {}", profile_id);
                    (state, true)
                }
                None => (ProgressionState::default(), false),
            },
        };

        self.state = state;
        self.active_profile = Some(profile_id.to_string());

        if migrated {
            self.persist_progress();
            self.persist_stickers();
            for key in ProgressionKeys::legacy().all() {
                if let Err(e) = self.storage.remove(key) {
                    warn!("Failed to remove legacy key {}: {}", key, e);
                }
            }
        }

        self.finish_covered_level();

        let passed = self.state.current_level - 1;
        self.reconcile_stickers(passed, None);

        info!(
            "Loaded profile {}: level {}, {}/{} animals, {} stickers",
            profile_id,
            self.state.current_level,
            self.state.completed_animals.len(),
            self.roster.len(),
            self.state.stickers.len()
        );

        self.state.clone()
    }

    /// Re-read the active profile from storage, picking up writes made elsewhere
    pub fn reload(&mut self) -> Option<ProgressionState> {
        let profile_id = self.active_profile.clone()?;
        debug!("Reloading profile {}", profile_id);
        Some(self.load_profile(&profile_id))
    }

    /// Mark an animal's interaction as complete for the current level
    pub fn complete_animal(&mut self, animal_id: &str) -> CompletionResult {
        if !self.roster.contains(animal_id) {
            warn!("Ignoring completion for unknown animal: {}", animal_id);
            return self.rejected(CompletionRejection::UnknownAnimal);
        }

        if self.state.completed_animals.contains(animal_id) {
            debug!(
                "Animal {} already completed on level {}",
                animal_id, self.state.current_level
            );
            return self.rejected(CompletionRejection::AlreadyCompleted);
        }

        self.state.completed_animals.insert(animal_id.to_string());

        let level_complete = self
            .roster
            .ids()
            .all(|id| self.state.completed_animals.contains(id));

        let mut completed_level = None;
        if level_complete && self.state.current_level < self.max_level {
            let finished = self.state.current_level;
            self.state.current_level += 1;
            self.state.completed_animals.clear();
            completed_level = Some(finished);
            info!(
                "Level {} complete, advancing to level {}",
                finished, self.state.current_level
            );
        } else if level_complete {
            info!("Every animal completed on the final level {}", self.max_level);
        }

        self.persist_progress();

        CompletionResult::Completed {
            level_up: completed_level.is_some(),
            completed_level,
            progress: self.snapshot(),
        }
    }

    /// Add a sticker unless it is already on the board. Returns whether it was added.
    pub fn award_sticker(&mut self, sticker: Sticker) -> bool {
        if sticker.level == 0 || sticker.level >= self.state.current_level {
            warn!(
                "Refusing sticker {} while on level {}",
                sticker, self.state.current_level
            );
            return false;
        }

        if self.state.stickers.contains(&sticker) {
            debug!("Sticker {} already awarded", sticker);
            return false;
        }

        self.state.stickers.push(sticker);
        info!("Awarded sticker {}", sticker);
        self.persist_stickers();
        true
    }

    /// Make the sticker board match levels `1..=allowed_max_level`.
    ///
    /// Stickers above the limit are removed and missing ones are added, except
    /// `exclude_level`, whose sticker is left exactly as it is. The board ends
    /// up ordered by level.
    pub fn reconcile_stickers(&mut self, allowed_max_level: u32, exclude_level: Option<u32>) {
        let before = self.state.stickers.clone();

        let mut stickers: Vec<Sticker> = self
            .state
            .stickers
            .iter()
            .copied()
            .filter(|s| s.level <= allowed_max_level || Some(s.level) == exclude_level)
            .collect();

        for level in 1..=allowed_max_level {
            let sticker = Sticker::for_level(level);
            if Some(level) != exclude_level && !stickers.contains(&sticker) {
                stickers.push(sticker);
            }
        }

        stickers.sort();
        stickers.dedup();

        if stickers != before {
            info!(
                "Reconciled stickers up to level {}: {} -> {}",
                allowed_max_level,
                before.len(),
                stickers.len()
            );
            self.state.stickers = stickers;
            self.persist_stickers();
        }
    }

    /// Wipe a profile's progression back to defaults
    pub fn reset_profile(&mut self, profile_id: &str) {
        for key in ProgressionKeys::for_profile(profile_id).all() {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove {} while resetting {}: {}", key, profile_id, e);
            }
        }

        if self.active_profile.as_deref() == Some(profile_id) {
            self.state = ProgressionState::default();
        }

        info!("Reset progression for profile {}", profile_id);
    }

    /// Forget the loaded profile; writes stay gated until the next load
    pub fn unload(&mut self) {
        if let Some(profile_id) = self.active_profile.take() {
            info!("Unloaded profile {}", profile_id);
        }
        self.state = ProgressionState::default();
    }

    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::new(self.state.completed_animals.len(), self.roster.len())
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current_level: self.state.current_level,
            completed: self.state.completed_animals.len(),
            total: self.roster.len(),
        }
    }

    pub fn is_animal_completed_this_level(&self, animal_id: &str) -> bool {
        self.state.completed_animals.contains(animal_id)
    }

    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    pub fn completed_animals(&self) -> &BTreeSet<String> {
        &self.state.completed_animals
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.state.stickers
    }

    pub fn sticker_ids(&self) -> Vec<String> {
        self.state.stickers.iter().map(Sticker::id).collect()
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn active_profile(&self) -> Option<&str> {
        self.active_profile.as_deref()
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Level up a loaded state whose completed set already covers the roster.
    ///
    /// Happens when the cap was raised after the old top level was finished,
    /// or when a smaller roster is configured.
    fn finish_covered_level(&mut self) {
        let covered = self
            .roster
            .ids()
            .all(|id| self.state.completed_animals.contains(id));
        if !covered || self.state.current_level >= self.max_level {
            return;
        }

        let finished = self.state.current_level;
        self.state.current_level += 1;
        self.state.completed_animals.clear();
        info!(
            "Level {} was already complete on load, advancing to level {}",
            finished, self.state.current_level
        );
        self.persist_progress();
    }

    fn rejected(&self, reason: CompletionRejection) -> CompletionResult {
        CompletionResult::Rejected {
            reason,
            progress: self.snapshot(),
        }
    }

    /// Read all three keys; `None` when none of them exist
    fn read_state(&self, keys: &ProgressionKeys) -> Option<ProgressionState> {
        let level = self.read_key(&keys.level);
        let completed = self.read_key(&keys.completed);
        let stickers = self.read_key(&keys.stickers);

        if level.is_none() && completed.is_none() && stickers.is_none() {
            return None;
        }

        Some(ProgressionState {
            current_level: level
                .map(|raw| self.parse_level(&keys.level, &raw))
                .unwrap_or(1),
            completed_animals: completed
                .map(|raw| self.parse_completed(&keys.completed, &raw))
                .unwrap_or_default(),
            stickers: stickers
                .map(|raw| parse_stickers(&keys.stickers, &raw))
                .unwrap_or_default(),
        })
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {}: {}. Treating it as empty.", key, e);
                None
            }
        }
    }

    fn parse_level(&self, key: &str, raw: &str) -> u32 {
        match raw.trim().parse::<u32>() {
            Ok(level) if (1..=self.max_level).contains(&level) => level,
            Ok(level) => {
                let clamped = level.clamp(1, self.max_level);
                warn!("Level {} under {} is out of range, using {}", level, key, clamped);
                clamped
            }
            Err(e) => {
                warn!("Malformed level under {}: {}. Starting at level 1.", key, e);
                1
            }
        }
    }

    fn parse_completed(&self, key: &str, raw: &str) -> BTreeSet<String> {
        let ids: Vec<String> = match serde_json::from_str(raw) {
            Ok(ids) => ids,
            Err(e) => {
                warn!("Malformed completed animals under {}: {}. Using none.", key, e);
                return BTreeSet::new();
            }
        };

        ids.into_iter()
            .filter(|id| {
                let known = self.roster.contains(id);
                if !known {
                    warn!("Dropping unknown animal {} from {}", id, key);
                }
                known
            })
            .collect()
    }

    fn persist_progress(&self) {
        let Some(profile_id) = self.active_profile.as_deref() else {
            debug!("No profile loaded, skipping progress write");
            return;
        };
        let keys = ProgressionKeys::for_profile(profile_id);

        if let Err(e) = self
            .storage
            .set(&keys.level, &self.state.current_level.to_string())
        {
            warn!("Failed to save level for {}: {}", profile_id, e);
        }

        let completed: Vec<&String> = self.state.completed_animals.iter().collect();
        match serde_json::to_string(&completed) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&keys.completed, &json) {
                    warn!("Failed to save completed animals for {}: {}", profile_id, e);
                }
            }
            Err(e) => warn!("Failed to encode completed animals: {}", e),
        }
    }

    fn persist_stickers(&self) {
        let Some(profile_id) = self.active_profile.as_deref() else {
            debug!("No profile loaded, skipping sticker write");
            return;
        };
        let keys = ProgressionKeys::for_profile(profile_id);

        match serde_json::to_string(&self.state.stickers) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&keys.stickers, &json) {
                    warn!("Failed to save stickers for {}: {}", profile_id, e);
                }
            }
            Err(e) => warn!("Failed to encode stickers: {}", e),
        }
    }
}

fn parse_stickers(key: &str, raw: &str) -> Vec<Sticker> {
    let entries: Vec<PersistedSticker> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Malformed stickers under {}: {}. Using none.", key, e);
            return Vec::new();
        }
    };

    let mut stickers = Vec::with_capacity(entries.len());
    for entry in entries {
        let sticker = match entry {
            PersistedSticker::Record(sticker) => Some(sticker),
            PersistedSticker::Legacy(id) => {
                let parsed = Sticker::from_legacy_id(&id);
                if parsed.is_none() {
                    debug!("Dropping unrecognised sticker {}", id);
                }
                parsed
            }
        };

        if let Some(sticker) = sticker {
            if sticker.level > 0 && !stickers.contains(&sticker) {
                stickers.push(sticker);
            }
        }
    }
    stickers
}
