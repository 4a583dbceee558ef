use serde::Serialize;

use crate::model::{CutType, DeviceType, Scored, ScoringWarning, ShapeType};

const LEVEL_COEFFICIENTS: [f64; 8] = [1.0, 1.2, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0];
pub const DEFAULT_LEVEL_COEFFICIENT: f64 = 1.0;

pub fn level_coefficient(level: u8) -> Scored<f64> {
    match level
        .checked_sub(1)
        .and_then(|index| LEVEL_COEFFICIENTS.get(usize::from(index)))
    {
        Some(coefficient) => Scored::clean(*coefficient),
        None => Scored::with_warning(
            DEFAULT_LEVEL_COEFFICIENT,
            ScoringWarning::UnknownLevel {
                level,
                fallback: DEFAULT_LEVEL_COEFFICIENT,
            },
        ),
    }
}

pub fn cut_type_coefficient(cut_type: CutType) -> f64 {
    match cut_type {
        CutType::Straight => 1.0,
        CutType::Diagonal => 1.15,
        CutType::Curve => 1.25,
    }
}

/// Phones get a small boost for the harder touch controls; tablets do not.
pub fn device_coefficient(device_type: DeviceType) -> f64 {
    if device_type.is_phone() {
        1.1
    } else {
        1.0
    }
}

pub fn shape_coefficient(shape_type: Option<ShapeType>) -> Scored<f64> {
    match shape_type {
        Some(ShapeType::Polygon) => Scored::clean(1.0),
        Some(ShapeType::Cloud) => Scored::clean(1.1),
        Some(ShapeType::Jagged) => Scored::clean(1.05),
        None => Scored::with_warning(1.0, ScoringWarning::MissingShapeType),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DifficultyMultiplier {
    pub level: f64,
    pub cut_type: f64,
    pub device: f64,
    pub shape: f64,
    pub total: f64,
}

/// Product of the four independent coefficients. Not clamped.
pub fn difficulty_multiplier(
    level: u8,
    cut_type: CutType,
    device_type: DeviceType,
    shape_type: Option<ShapeType>,
) -> Scored<DifficultyMultiplier> {
    let mut warnings = Vec::new();
    let level = level_coefficient(level).collect_into(&mut warnings);
    let shape = shape_coefficient(shape_type).collect_into(&mut warnings);
    let cut_type = cut_type_coefficient(cut_type);
    let device = device_coefficient(device_type);
    Scored {
        value: DifficultyMultiplier {
            level,
            cut_type,
            device,
            shape,
            total: level * cut_type * device * shape,
        },
        warnings,
    }
}
