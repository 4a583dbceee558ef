use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DurationSecondsWithFrac;
use std::time::Duration;

use super::{DeviceType, DifficultyConfig, ShapeType};

/// Session telemetry. Counters only grow during play; the snapshot is frozen
/// once the puzzle is completed.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameplayStats {
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    pub total_duration: Duration,
    #[serde(default)]
    pub total_rotations: u32,
    #[serde(default)]
    pub hint_usage_count: u32,
    #[serde(default)]
    pub drag_operations: u32,
    pub difficulty: DifficultyConfig,
    /// Captured once, right after the pieces are scattered. `None` until then.
    #[serde(default)]
    pub min_rotations: Option<u32>,
    #[serde(default)]
    pub rotation_efficiency: f64,
    #[serde(default)]
    pub hint_allowance: u32,
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub shape_type: Option<ShapeType>,
}

impl GameplayStats {
    pub fn new(difficulty: DifficultyConfig, hint_allowance: u32) -> Self {
        Self {
            total_duration: Duration::ZERO,
            total_rotations: 0,
            hint_usage_count: 0,
            drag_operations: 0,
            difficulty,
            min_rotations: None,
            rotation_efficiency: 0.0,
            hint_allowance,
            device_type: DeviceType::default(),
            shape_type: None,
        }
    }

    pub fn with_device(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    pub fn with_shape(mut self, shape_type: ShapeType) -> Self {
        self.shape_type = Some(shape_type);
        self
    }

    /// Stores the scatter-time minimum. Later calls are ignored: completed
    /// pieces settle at 0 degrees, so a recount would always yield 0.
    pub fn capture_min_rotations(&mut self, min_rotations: u32) -> bool {
        if self.min_rotations.is_some() {
            return false;
        }
        self.min_rotations = Some(min_rotations);
        true
    }
}
