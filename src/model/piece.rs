use serde::{Deserialize, Serialize};

/// The slice of a puzzle piece the scorer reads. Geometry used for drawing
/// lives with the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PuzzlePieceState {
    /// Degrees, unrestricted range (may be negative or exceed 360).
    pub rotation: f64,
    #[serde(default)]
    pub is_completed: bool,
}

impl PuzzlePieceState {
    pub fn new(rotation: f64) -> Self {
        Self {
            rotation,
            is_completed: false,
        }
    }

    pub fn completed(&self) -> Self {
        Self {
            rotation: 0.0,
            is_completed: true,
        }
    }
}
