use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Completion scoring result. Rebuilt on every computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub base_score: i64,
    pub time_bonus: i64,
    /// 1-based tier matched by the elapsed time, 0 when slower than every tier.
    pub time_bonus_rank: u8,
    pub is_time_record: bool,
    pub rotation_score: i64,
    pub rotation_efficiency: f64,
    pub min_rotations: u32,
    pub hint_score: i64,
    pub hint_allowance: u32,
    pub difficulty_multiplier: f64,
    pub final_score: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "snake_case")]
pub enum DeltaReason {
    #[display("game start")]
    GameStart,
    #[display("rotation")]
    Rotation,
    #[display("hint used")]
    HintUsed,
    #[display("piece moved")]
    Drag,
    #[display("time elapsed")]
    TimeElapsed,
    #[display("no change")]
    NoChange,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreDelta {
    pub delta: i64,
    pub new_score: u32,
    pub reason: DeltaReason,
}
