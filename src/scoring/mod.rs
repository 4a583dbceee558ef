pub mod difficulty_multiplier;
mod engine;
pub mod hint_score;
pub mod leaderboard;
pub mod rotation_efficiency;
pub mod rotation_geometry;
pub mod time_bonus;

pub use difficulty_multiplier::{difficulty_multiplier, DifficultyMultiplier};
pub use engine::{
    base_score, ScoringEngine, ScoringError, DEFAULT_BASE_SCORE, FINAL_SCORE_FALLBACK,
    LIVE_SCORE_FALLBACK, SCORE_FLOOR,
};
pub use hint_score::{calculate_hint_score, hint_allowance};
pub use leaderboard::{check_time_record, format_rank_display, new_record_badge, TimeRecordCheck};
pub use rotation_efficiency::{
    calculate_score, calculate_score_localized, legacy_rotation_score, rotation_score_with_fallback,
    RotationScore, RotationValidationError, TranslationError, Translator, ValidatedTranslator,
};
pub use rotation_geometry::{minimum_rotations_at_start, remaining_rotations};
pub use time_bonus::{TimeBonus, TimeThresholds};
