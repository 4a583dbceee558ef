mod device;
mod diagnostics;
mod difficulty;
mod game_record;
mod gameplay_stats;
mod hint_policy;
mod piece;
mod score;

pub use device::{DeviceType, ShapeType};
pub use diagnostics::{ScoreTerm, Scored, ScoringWarning};
pub use difficulty::{CutType, DifficultyConfig, DifficultyLevel, MAX_CUT_COUNT, MIN_CUT_COUNT};
pub use game_record::GameRecord;
pub use gameplay_stats::GameplayStats;
pub use hint_policy::{
    HintPolicy, HintPolicyUpdate, DEFAULT_EXCESS_HINT_PENALTY, DEFAULT_FREE_HINTS_PER_GAME,
    DEFAULT_ZERO_HINT_BONUS,
};
pub use piece::PuzzlePieceState;
pub use score::{DeltaReason, ScoreBreakdown, ScoreDelta};
