use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationSecondsWithFrac;
use std::time::Duration;
use uuid::Uuid;

use super::{DifficultyConfig, GameplayStats, ScoreBreakdown};

/// One leaderboard entry. The history is owned by whatever store persists
/// it; the scorer only reads snapshots.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub timestamp: i64,
    pub final_score: u32,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub total_duration: Duration,
    pub difficulty: DifficultyConfig,
    pub total_rotations: u32,
    pub hint_usage_count: u32,
    pub rotation_efficiency: f64,
    pub id: Uuid,
}

impl GameRecord {
    pub fn from_completed(stats: &GameplayStats, breakdown: &ScoreBreakdown) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            final_score: breakdown.final_score,
            total_duration: stats.total_duration,
            difficulty: stats.difficulty.clone(),
            total_rotations: stats.total_rotations,
            hint_usage_count: stats.hint_usage_count,
            rotation_efficiency: breakdown.rotation_efficiency,
            id: Uuid::new_v4(),
        }
    }

    pub fn level(&self) -> u8 {
        self.difficulty.level()
    }
}
