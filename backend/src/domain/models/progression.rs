use std::collections::BTreeSet;

use super::sticker::Sticker;

/// Everything persisted for one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    pub current_level: u32,
    pub completed_animals: BTreeSet<String>,
    /// Ordered by level once reconciled
    pub stickers: Vec<Sticker>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            current_level: 1,
            completed_animals: BTreeSet::new(),
            stickers: Vec::new(),
        }
    }
}

/// Where the current level stands after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub current_level: u32,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl LevelProgress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        Self {
            completed,
            total,
            percentage,
        }
    }
}

/// Why a completion was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionRejection {
    AlreadyCompleted,
    UnknownAnimal,
}

impl CompletionRejection {
    pub fn message(&self) -> &'static str {
        match self {
            CompletionRejection::AlreadyCompleted => "Animal already completed",
            CompletionRejection::UnknownAnimal => "Unknown animal",
        }
    }
}

/// Result of `ProgressionStore::complete_animal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Completed {
        level_up: bool,
        /// Level just finished; `Some` only when `level_up` is true
        completed_level: Option<u32>,
        progress: ProgressSnapshot,
    },
    Rejected {
        reason: CompletionRejection,
        progress: ProgressSnapshot,
    },
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionResult::Completed { .. })
    }

    pub fn level_up(&self) -> bool {
        matches!(self, CompletionResult::Completed { level_up: true, .. })
    }

    pub fn completed_level(&self) -> Option<u32> {
        match self {
            CompletionResult::Completed { completed_level, .. } => *completed_level,
            CompletionResult::Rejected { .. } => None,
        }
    }

    pub fn progress(&self) -> ProgressSnapshot {
        match self {
            CompletionResult::Completed { progress, .. } => *progress,
            CompletionResult::Rejected { progress, .. } => *progress,
        }
    }

    pub fn rejection(&self) -> Option<CompletionRejection> {
        match self {
            CompletionResult::Completed { .. } => None,
            CompletionResult::Rejected { reason, .. } => Some(*reason),
        }
    }
}
