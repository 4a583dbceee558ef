use std::time::Duration;

use crate::model::PuzzlePieceState;

/// Gameplay notifications from the UI/game loop.
#[derive(Debug, Clone, PartialEq)]
pub enum GameplayEvent {
    /// Pieces were scattered with their starting angles.
    Scattered(Vec<PuzzlePieceState>),
    Rotated { piece: usize, degrees: f64 },
    HintUsed,
    Dragged,
    PieceCompleted(usize),
    /// Total active play time so far.
    ClockTick(Duration),
}
