use serde::Serialize;
use std::time::Duration;

/// (time factor, base bonus) per tier, fastest first.
const TIER_SHAPE: [(f64, f64); 5] = [
    (1.0, 600.0),
    (1.3, 400.0),
    (1.6, 300.0),
    (2.0, 200.0),
    (2.5, 100.0),
];

/// Expected seconds per piece for a difficulty level.
pub fn average_seconds_per_piece(level: u8) -> f64 {
    match level {
        0..=2 => 5.0,
        3..=4 => 7.0,
        5..=6 => 10.0,
        _ => 18.0,
    }
}

pub fn bonus_multiplier(level: u8) -> f64 {
    match level {
        0..=2 => 1.0,
        3..=4 => 1.2,
        5..=6 => 1.5,
        _ => 2.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeBonusTier {
    pub max_seconds: f64,
    pub bonus: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct TimeBonus {
    pub bonus: i64,
    /// 1-based tier index; 0 when no tier matched.
    pub rank: u8,
}

/// Time brackets for one session, scaled by piece count and level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeThresholds {
    pub base_seconds: f64,
    pub tiers: [TimeBonusTier; 5],
}

impl TimeThresholds {
    pub fn for_session(piece_count: u32, level: u8) -> Self {
        let base_seconds = f64::from(piece_count) * average_seconds_per_piece(level);
        let multiplier = bonus_multiplier(level);
        let tiers = TIER_SHAPE.map(|(factor, base_bonus)| TimeBonusTier {
            max_seconds: base_seconds * factor,
            bonus: (base_bonus * multiplier).round() as i64,
        });
        Self {
            base_seconds,
            tiers,
        }
    }

    /// Bonus of the first tier whose limit is not exceeded.
    pub fn bonus_for(&self, elapsed: Duration) -> TimeBonus {
        let seconds = elapsed.as_secs_f64();
        self.tiers
            .iter()
            .position(|tier| tier.max_seconds >= seconds)
            .map(|index| TimeBonus {
                bonus: self.tiers[index].bonus,
                rank: (index + 1) as u8,
            })
            .unwrap_or_default()
    }
}
