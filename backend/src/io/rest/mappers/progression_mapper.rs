use shared::{
    CompleteAnimalResponse, LevelProgress, ProgressSnapshot, ProgressionResponse,
    ReconcileStickersRequest, Sticker,
};

use crate::domain::commands::stickers::ReconcileStickersCommand;
use crate::domain::models::progression::{
    CompletionResult, LevelProgress as DomainLevelProgress, ProgressSnapshot as DomainSnapshot,
};
use crate::domain::models::sticker::Sticker as DomainSticker;
use crate::domain::ProgressionStore;

pub struct ProgressionMapper;

impl ProgressionMapper {
    pub fn sticker_to_dto(sticker: DomainSticker) -> Sticker {
        Sticker {
            level: sticker.level,
            id: sticker.id(),
        }
    }

    pub fn sticker_list_to_dto(stickers: &[DomainSticker]) -> Vec<Sticker> {
        stickers.iter().copied().map(Self::sticker_to_dto).collect()
    }

    pub fn snapshot_to_dto(snapshot: DomainSnapshot) -> ProgressSnapshot {
        ProgressSnapshot {
            current_level: snapshot.current_level,
            completed: snapshot.completed,
            total: snapshot.total,
        }
    }

    pub fn level_progress_to_dto(progress: DomainLevelProgress) -> LevelProgress {
        LevelProgress {
            completed: progress.completed,
            total: progress.total,
            percentage: progress.percentage,
        }
    }

    /// Full view of the profile currently loaded in `store`
    pub fn to_progression_response(profile_id: &str, store: &ProgressionStore) -> ProgressionResponse {
        ProgressionResponse {
            profile_id: profile_id.to_string(),
            current_level: store.current_level(),
            max_level: store.max_level(),
            completed_animals: store.completed_animals().iter().cloned().collect(),
            stickers: Self::sticker_list_to_dto(store.stickers()),
            level_progress: Self::level_progress_to_dto(store.level_progress()),
        }
    }

    pub fn to_complete_response(result: CompletionResult) -> CompleteAnimalResponse {
        let message = match (&result, result.completed_level()) {
            (CompletionResult::Rejected { reason, .. }, _) => Some(reason.message().to_string()),
            (_, Some(level)) => Some(format!("Level {} complete!", level)),
            _ => None,
        };

        CompleteAnimalResponse {
            success: result.is_success(),
            level_up: result.level_up(),
            completed_level: result.completed_level(),
            message,
            progress: Self::snapshot_to_dto(result.progress()),
        }
    }

    pub fn to_reconcile_command(request: ReconcileStickersRequest) -> ReconcileStickersCommand {
        ReconcileStickersCommand {
            allowed_max_level: request.allowed_max_level,
            exclude_level: request.exclude_level,
        }
    }
}
