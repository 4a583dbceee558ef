use log::{debug, trace};
use serde::Serialize;

use super::GameplayEvent;
use crate::events::EventHandler;
use crate::model::{
    DeviceType, DifficultyConfig, GameRecord, GameplayStats, PuzzlePieceState, ScoreBreakdown,
    ShapeType,
};
use crate::scoring::leaderboard::{check_time_record, TimeRecordCheck};
use crate::scoring::rotation_efficiency::rotation_efficiency_percent;
use crate::scoring::rotation_geometry::{minimum_rotations_at_start, remaining_rotations};
use crate::scoring::{hint_allowance, ScoringEngine};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedSession {
    pub breakdown: ScoreBreakdown,
    pub record: GameRecord,
    pub record_check: TimeRecordCheck,
}

/// Tracks one play-through: folds gameplay events into a `GameplayStats`
/// snapshot and freezes it when the puzzle is completed.
#[derive(Debug, Clone)]
pub struct ScoreSession {
    engine: ScoringEngine,
    stats: GameplayStats,
    pieces: Vec<PuzzlePieceState>,
    completed: Option<CompletedSession>,
}

impl ScoreSession {
    pub fn new(
        engine: ScoringEngine,
        difficulty: DifficultyConfig,
        device_type: DeviceType,
        shape_type: Option<ShapeType>,
    ) -> Self {
        let allowance = hint_allowance(&difficulty, engine.hint_policy()).value;
        let mut stats = GameplayStats::new(difficulty, allowance).with_device(device_type);
        stats.shape_type = shape_type;
        Self {
            engine,
            stats,
            pieces: Vec::new(),
            completed: None,
        }
    }

    pub fn stats(&self) -> &GameplayStats {
        &self.stats
    }

    pub fn pieces(&self) -> &[PuzzlePieceState] {
        &self.pieces
    }

    pub fn is_completed(&self) -> bool {
        self.completed.is_some()
    }

    pub fn completed(&self) -> Option<&CompletedSession> {
        self.completed.as_ref()
    }

    pub fn live_score(&self) -> u32 {
        self.engine.calculate_live_score(&self.stats)
    }

    pub fn remaining_rotations(&self) -> u32 {
        remaining_rotations(&self.pieces)
    }

    /// Scores the finished puzzle against `leaderboard` and freezes the
    /// session. Calling it again returns the first result unchanged.
    pub fn complete(&mut self, leaderboard: &[GameRecord]) -> CompletedSession {
        if let Some(completed) = &self.completed {
            return completed.clone();
        }
        let breakdown = self
            .engine
            .calculate_final_score(&self.stats, &self.pieces, leaderboard);
        let record_check = check_time_record(
            self.stats.total_duration,
            self.stats.difficulty.level(),
            leaderboard,
        );
        let record = GameRecord::from_completed(&self.stats, &breakdown);
        debug!(
            target: "session",
            "Session completed: score {} in {:?} (rank {}/{})",
            breakdown.final_score,
            self.stats.total_duration,
            record_check.rank,
            record_check.total_records
        );
        let completed = CompletedSession {
            breakdown,
            record,
            record_check,
        };
        self.completed = Some(completed.clone());
        completed
    }

    fn refresh_rotation_efficiency(&mut self) {
        if let Some(min) = self.stats.min_rotations {
            self.stats.rotation_efficiency =
                rotation_efficiency_percent(i64::from(self.stats.total_rotations), i64::from(min));
        }
    }
}

impl EventHandler<GameplayEvent> for ScoreSession {
    fn handle_event(&mut self, event: &GameplayEvent) {
        if self.is_completed() {
            trace!(target: "session", "Ignoring {:?} after completion", event);
            return;
        }
        match event {
            GameplayEvent::Scattered(pieces) => {
                self.pieces = pieces.clone();
                let min = minimum_rotations_at_start(&self.pieces);
                if !self.stats.capture_min_rotations(min) {
                    debug!(target: "session", "Minimum rotations already captured; ignoring {min}");
                }
                self.refresh_rotation_efficiency();
            }
            GameplayEvent::Rotated { piece, degrees } => {
                self.stats.total_rotations = self.stats.total_rotations.saturating_add(1);
                if let Some(state) = self.pieces.get_mut(*piece) {
                    state.rotation += degrees;
                }
                self.refresh_rotation_efficiency();
            }
            GameplayEvent::HintUsed => {
                self.stats.hint_usage_count = self.stats.hint_usage_count.saturating_add(1);
            }
            GameplayEvent::Dragged => {
                self.stats.drag_operations = self.stats.drag_operations.saturating_add(1);
            }
            GameplayEvent::PieceCompleted(index) => {
                if let Some(state) = self.pieces.get_mut(*index) {
                    *state = state.completed();
                }
            }
            GameplayEvent::ClockTick(elapsed) => {
                self.stats.total_duration = self.stats.total_duration.max(*elapsed);
            }
        }
    }
}
