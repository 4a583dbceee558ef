use derive_more::{Display, Error};
use log::{debug, warn};

use super::difficulty_multiplier::difficulty_multiplier;
use super::hint_score::{calculate_hint_score, hint_allowance};
use super::leaderboard::check_time_record;
use super::rotation_efficiency::{rotation_efficiency_percent, rotation_score_with_fallback};
use super::time_bonus::{TimeBonus, TimeThresholds};
use crate::model::{
    DeltaReason, GameRecord, GameplayStats, HintPolicy, HintPolicyUpdate, PuzzlePieceState,
    ScoreBreakdown, ScoreDelta, ScoreTerm, Scored, ScoringWarning,
};

pub const SCORE_FLOOR: u32 = 100;
pub const LIVE_SCORE_FALLBACK: u32 = 0;
pub const FINAL_SCORE_FALLBACK: u32 = SCORE_FLOOR;
pub const DEFAULT_BASE_SCORE: i64 = 1000;

const BASE_SCORES: [i64; 8] = [500, 800, 1200, 1800, 2500, 3500, 5000, 8000];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ScoringError {
    #[display("score overflowed in the {term}")]
    Overflow { term: ScoreTerm },
    #[display("score is not a finite number")]
    NonFinite,
}

pub fn base_score(level: u8) -> Scored<i64> {
    match level
        .checked_sub(1)
        .and_then(|index| BASE_SCORES.get(usize::from(index)))
    {
        Some(score) => Scored::clean(*score),
        None => Scored::with_warning(
            DEFAULT_BASE_SCORE,
            ScoringWarning::UnknownLevel {
                level,
                fallback: DEFAULT_BASE_SCORE as f64,
            },
        ),
    }
}

/// Everything before the difficulty multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Subtotal {
    base_score: i64,
    time_bonus: TimeBonus,
    rotation_score: i64,
    rotation_efficiency: f64,
    min_rotations: u32,
    hint_score: i64,
    hint_allowance: u32,
    total: i64,
}

/// Runs one scoring term; a failing term contributes its default and a
/// warning instead of failing the whole aggregation.
fn term_or_default<T: Default>(
    term: ScoreTerm,
    warnings: &mut Vec<ScoringWarning>,
    compute: impl FnOnce() -> Result<Scored<T>, ScoringError>,
) -> T {
    match compute() {
        Ok(scored) => scored.collect_into(warnings),
        Err(err) => {
            warnings.push(ScoringWarning::TermDegraded {
                term,
                reason: err.to_string(),
            });
            T::default()
        }
    }
}

fn compute_or_default<T>(
    fallback: T,
    fallback_score: u32,
    warnings: &mut Vec<ScoringWarning>,
    compute: impl FnOnce(&mut Vec<ScoringWarning>) -> Result<T, ScoringError>,
) -> T {
    match compute(warnings) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(ScoringWarning::FallbackScore {
                reason: err.to_string(),
                fallback: fallback_score,
            });
            fallback
        }
    }
}

fn floor_score(score: f64) -> Result<u32, ScoringError> {
    if !score.is_finite() {
        return Err(ScoringError::NonFinite);
    }
    Ok(score.round().max(f64::from(SCORE_FLOOR)).min(f64::from(u32::MAX)) as u32)
}

fn fallback_breakdown() -> ScoreBreakdown {
    ScoreBreakdown {
        base_score: 0,
        time_bonus: 0,
        time_bonus_rank: 0,
        is_time_record: false,
        rotation_score: 0,
        rotation_efficiency: 0.0,
        min_rotations: 0,
        hint_score: 0,
        hint_allowance: 0,
        difficulty_multiplier: 1.0,
        final_score: FINAL_SCORE_FALLBACK,
    }
}

fn log_warnings(context: &str, warnings: &[ScoringWarning]) {
    for warning in warnings {
        match warning {
            ScoringWarning::FallbackScore { .. }
            | ScoringWarning::LegacyRotationFallback { .. } => {
                warn!(target: "scoring", "{context}: {warning}")
            }
            _ => debug!(target: "scoring", "{context}: {warning}"),
        }
    }
}

/// Scores sessions under one hint policy. The policy is owned by the engine
/// rather than shared, so concurrent callers never see each other's overrides.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    hint_policy: HintPolicy,
}

impl ScoringEngine {
    pub fn new(hint_policy: HintPolicy) -> Self {
        Self { hint_policy }
    }

    pub fn hint_policy(&self) -> &HintPolicy {
        &self.hint_policy
    }

    pub fn set_hint_policy(&mut self, update: &HintPolicyUpdate) {
        self.hint_policy = self.hint_policy.with_update(update);
    }

    /// Copy of this engine using `hint_policy` for a single computation.
    pub fn with_hint_policy(&self, hint_policy: HintPolicy) -> ScoringEngine {
        ScoringEngine { hint_policy }
    }

    fn subtotal(
        &self,
        stats: &GameplayStats,
        warnings: &mut Vec<ScoringWarning>,
    ) -> Result<Subtotal, ScoringError> {
        let level = stats.difficulty.level();

        let base_score = term_or_default(ScoreTerm::BaseScore, warnings, || Ok(base_score(level)));
        let time_bonus = term_or_default(ScoreTerm::TimeBonus, warnings, || {
            Ok(Scored::clean(
                TimeThresholds::for_session(stats.difficulty.actual_pieces, level)
                    .bonus_for(stats.total_duration),
            ))
        });
        let rotation_score = term_or_default(ScoreTerm::RotationScore, warnings, || {
            Ok(match stats.min_rotations {
                Some(min) => rotation_score_with_fallback(
                    i64::from(stats.total_rotations),
                    i64::from(min),
                ),
                None => Scored::with_warning(0, ScoringWarning::MinRotationsUnknown),
            })
        });
        let allowance = hint_allowance(&stats.difficulty, &self.hint_policy).collect_into(warnings);
        let hint_score = term_or_default(ScoreTerm::HintScore, warnings, || {
            calculate_hint_score(stats.hint_usage_count, allowance, &self.hint_policy)
                .map(Scored::clean)
                .ok_or(ScoringError::Overflow {
                    term: ScoreTerm::HintScore,
                })
        });

        let total = [
            (ScoreTerm::TimeBonus, time_bonus.bonus),
            (ScoreTerm::RotationScore, rotation_score),
            (ScoreTerm::HintScore, hint_score),
        ]
        .into_iter()
        .try_fold(base_score, |sum, (term, value)| {
            sum.checked_add(value).ok_or(ScoringError::Overflow { term })
        })?;

        let rotation_efficiency = match stats.min_rotations {
            Some(min) => {
                rotation_efficiency_percent(i64::from(stats.total_rotations), i64::from(min))
            }
            None => stats.rotation_efficiency,
        };

        Ok(Subtotal {
            base_score,
            time_bonus,
            rotation_score,
            rotation_efficiency,
            min_rotations: stats.min_rotations.unwrap_or(0),
            hint_score,
            hint_allowance: allowance,
            total,
        })
    }

    /// In-progress score. The difficulty multiplier is left out until
    /// completion so the displayed number does not jump.
    pub fn evaluate_live(&self, stats: &GameplayStats) -> Scored<u32> {
        let mut warnings = Vec::new();
        let value = compute_or_default(
            LIVE_SCORE_FALLBACK,
            LIVE_SCORE_FALLBACK,
            &mut warnings,
            |warnings| {
                let subtotal = self.subtotal(stats, warnings)?;
                floor_score(subtotal.total as f64)
            },
        );
        Scored { value, warnings }
    }

    pub fn calculate_live_score(&self, stats: &GameplayStats) -> u32 {
        let scored = self.evaluate_live(stats);
        log_warnings("live score", &scored.warnings);
        scored.value
    }

    pub fn evaluate_final(
        &self,
        stats: &GameplayStats,
        pieces: &[PuzzlePieceState],
        leaderboard: &[GameRecord],
    ) -> Scored<ScoreBreakdown> {
        let mut warnings = Vec::new();

        let remaining = pieces.iter().filter(|piece| !piece.is_completed).count();
        if remaining > 0 {
            warnings.push(ScoringWarning::IncompletePieces { remaining });
        }

        let level = stats.difficulty.level();
        let value = compute_or_default(
            fallback_breakdown(),
            FINAL_SCORE_FALLBACK,
            &mut warnings,
            |warnings| {
                let subtotal = self.subtotal(stats, warnings)?;
                let multiplier = difficulty_multiplier(
                    level,
                    stats.difficulty.cut_type,
                    stats.device_type,
                    stats.shape_type,
                )
                .collect_into(warnings);
                let record = check_time_record(stats.total_duration, level, leaderboard);

                Ok(ScoreBreakdown {
                    base_score: subtotal.base_score,
                    time_bonus: subtotal.time_bonus.bonus,
                    time_bonus_rank: subtotal.time_bonus.rank,
                    is_time_record: record.is_new_record,
                    rotation_score: subtotal.rotation_score,
                    rotation_efficiency: subtotal.rotation_efficiency,
                    min_rotations: subtotal.min_rotations,
                    hint_score: subtotal.hint_score,
                    hint_allowance: subtotal.hint_allowance,
                    difficulty_multiplier: multiplier.total,
                    final_score: floor_score(subtotal.total as f64 * multiplier.total)?,
                })
            },
        );
        Scored { value, warnings }
    }

    pub fn calculate_final_score(
        &self,
        stats: &GameplayStats,
        pieces: &[PuzzlePieceState],
        leaderboard: &[GameRecord],
    ) -> ScoreBreakdown {
        let scored = self.evaluate_final(stats, pieces, leaderboard);
        log_warnings("final score", &scored.warnings);
        scored.value
    }

    /// Live-score change between two snapshots. Without a previous snapshot
    /// the whole score counts as the delta.
    pub fn calculate_score_delta(
        &self,
        previous: Option<&GameplayStats>,
        current: &GameplayStats,
    ) -> ScoreDelta {
        let new_score = self.calculate_live_score(current);
        let Some(previous) = previous else {
            return ScoreDelta {
                delta: i64::from(new_score),
                new_score,
                reason: DeltaReason::GameStart,
            };
        };

        let old_score = self.calculate_live_score(previous);
        let reason = if current.hint_usage_count > previous.hint_usage_count {
            DeltaReason::HintUsed
        } else if current.total_rotations > previous.total_rotations {
            DeltaReason::Rotation
        } else if current.drag_operations > previous.drag_operations {
            DeltaReason::Drag
        } else if current.total_duration != previous.total_duration {
            DeltaReason::TimeElapsed
        } else {
            DeltaReason::NoChange
        };

        ScoreDelta {
            delta: i64::from(new_score) - i64::from(old_score),
            new_score,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CutType, DeviceType, DifficultyConfig, ShapeType};
    use crate::tests::UsingLogger;
    use std::time::Duration;
    use test_context::test_context;

    fn scenario_stats(rotations: u32) -> GameplayStats {
        let mut stats = GameplayStats::new(DifficultyConfig::new(1, CutType::Straight, 4), 3)
            .with_device(DeviceType::Desktop)
            .with_shape(ShapeType::Polygon);
        stats.total_duration = Duration::from_secs(18);
        stats.total_rotations = rotations;
        stats.capture_min_rotations(4);
        stats
    }

    fn completed_pieces() -> Vec<PuzzlePieceState> {
        vec![PuzzlePieceState::new(0.0).completed(); 4]
    }

    #[test]
    fn test_base_score_table() {
        assert_eq!(base_score(1).value, 500);
        assert_eq!(base_score(8).value, 8000);
        let unknown = base_score(0);
        assert_eq!(unknown.value, DEFAULT_BASE_SCORE);
        assert!(!unknown.is_clean());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_perfect_session_breakdown(_: &mut UsingLogger) {
        let engine = ScoringEngine::default();
        let breakdown = engine.calculate_final_score(&scenario_stats(4), &completed_pieces(), &[]);
        assert_eq!(breakdown.base_score, 500);
        assert_eq!(breakdown.time_bonus, 600);
        assert_eq!(breakdown.time_bonus_rank, 1);
        assert!(breakdown.is_time_record);
        assert_eq!(breakdown.rotation_score, 500);
        assert_eq!(breakdown.rotation_efficiency, 100.0);
        assert_eq!(breakdown.min_rotations, 4);
        assert_eq!(breakdown.hint_score, 500);
        assert_eq!(breakdown.hint_allowance, 3);
        assert_eq!(breakdown.difficulty_multiplier, 1.0);
        assert_eq!(breakdown.final_score, 2100);
    }

    #[test]
    fn test_live_score_skips_multiplier() {
        let engine = ScoringEngine::default();
        let mut stats = scenario_stats(4);
        stats.difficulty.cut_type = CutType::Curve;
        assert_eq!(engine.calculate_live_score(&stats), 2100);
        let breakdown = engine.calculate_final_score(&stats, &completed_pieces(), &[]);
        assert_eq!(breakdown.final_score, 2625);
    }

    #[test]
    fn test_unknown_min_rotations_degrades_rotation_term() {
        let engine = ScoringEngine::default();
        let mut stats = scenario_stats(4);
        stats.min_rotations = None;
        let scored = engine.evaluate_live(&stats);
        assert_eq!(scored.value, 500 + 600 + 500);
        assert_eq!(scored.warnings, vec![ScoringWarning::MinRotationsUnknown]);
    }

    #[test]
    fn test_overflowing_hint_penalty_degrades_hint_term() {
        let engine = ScoringEngine::new(HintPolicy {
            excess_hint_penalty: i64::MAX / 2,
            ..HintPolicy::default()
        });
        let mut stats = scenario_stats(4);
        stats.hint_usage_count = 6;

        let scored = engine.evaluate_live(&stats);
        assert_eq!(scored.value, 500 + 600 + 500);
        assert!(scored.warnings.contains(&ScoringWarning::TermDegraded {
            term: ScoreTerm::HintScore,
            reason: ScoringError::Overflow {
                term: ScoreTerm::HintScore
            }
            .to_string(),
        }));

        let breakdown = engine.calculate_final_score(&stats, &completed_pieces(), &[]);
        assert_eq!(breakdown.hint_score, 0);
        assert_eq!(breakdown.final_score, 1600);
    }

    #[test]
    fn test_under_minimum_rotations_flagged() {
        let engine = ScoringEngine::default();
        let stats = scenario_stats(2);
        let scored = engine.evaluate_live(&stats);
        // 2 rotations against a minimum of 4 scores +20
        assert_eq!(scored.value, 500 + 600 + 20 + 500);
        assert!(scored
            .warnings
            .contains(&ScoringWarning::UnderMinimumRotations { actual: 2, min: 4 }));
    }

    #[test]
    fn test_score_floor() {
        let engine = ScoringEngine::default();
        let mut stats = scenario_stats(1000);
        stats.total_duration = Duration::from_secs(3600);
        stats.hint_usage_count = 40;
        assert_eq!(engine.calculate_live_score(&stats), SCORE_FLOOR);
        assert_eq!(
            engine
                .calculate_final_score(&stats, &completed_pieces(), &[])
                .final_score,
            SCORE_FLOOR
        );
    }

    #[test]
    fn test_invalid_rotation_input_uses_legacy_tiers() {
        let engine = ScoringEngine::default();
        let stats = scenario_stats(1500);
        let scored = engine.evaluate_final(&stats, &completed_pieces(), &[]);
        // 4 / 1500 is well under 20% efficiency
        assert_eq!(scored.value.rotation_score, -200);
        assert!(scored
            .warnings
            .iter()
            .any(|w| matches!(w, ScoringWarning::LegacyRotationFallback { .. })));
    }

    #[test]
    fn test_incomplete_pieces_are_reported() {
        let engine = ScoringEngine::default();
        let mut pieces = completed_pieces();
        pieces[0] = PuzzlePieceState::new(90.0);
        let scored = engine.evaluate_final(&scenario_stats(4), &pieces, &[]);
        assert_eq!(scored.value.final_score, 2100);
        assert!(scored
            .warnings
            .contains(&ScoringWarning::IncompletePieces { remaining: 1 }));
    }

    #[test]
    fn test_per_engine_hint_policy() {
        let mut engine = ScoringEngine::default();
        engine.set_hint_policy(&HintPolicyUpdate {
            zero_hint_bonus: Some(300),
            ..Default::default()
        });
        assert_eq!(engine.calculate_live_score(&scenario_stats(4)), 1900);
        assert_eq!(ScoringEngine::default().calculate_live_score(&scenario_stats(4)), 2100);

        let strict = engine.with_hint_policy(HintPolicy {
            free_hints_per_game: 0,
            zero_hint_bonus: 0,
            excess_hint_penalty: 50,
        });
        let mut stats = scenario_stats(4);
        stats.hint_usage_count = 2;
        assert_eq!(strict.calculate_live_score(&stats), 1500);
    }

    #[test]
    fn test_score_delta_reasons() {
        let engine = ScoringEngine::default();
        let start = scenario_stats(4);
        let first = engine.calculate_score_delta(None, &start);
        assert_eq!(first.reason, DeltaReason::GameStart);
        assert_eq!(first.delta, i64::from(first.new_score));

        let mut rotated = start.clone();
        rotated.total_rotations += 1;
        let delta = engine.calculate_score_delta(Some(&start), &rotated);
        assert_eq!(delta.reason, DeltaReason::Rotation);
        assert_eq!(delta.delta, -510);

        let mut hinted = rotated.clone();
        hinted.hint_usage_count += 1;
        let delta = engine.calculate_score_delta(Some(&rotated), &hinted);
        assert_eq!(delta.reason, DeltaReason::HintUsed);
        assert_eq!(delta.delta, -500);

        let mut dragged = hinted.clone();
        dragged.drag_operations += 3;
        let delta = engine.calculate_score_delta(Some(&hinted), &dragged);
        assert_eq!(delta.reason, DeltaReason::Drag);
        assert_eq!(delta.delta, 0);

        let mut later = dragged.clone();
        later.total_duration += Duration::from_secs(60);
        let delta = engine.calculate_score_delta(Some(&dragged), &later);
        assert_eq!(delta.reason, DeltaReason::TimeElapsed);
        assert!(delta.delta < 0);

        assert_eq!(
            engine.calculate_score_delta(Some(&hinted), &hinted).reason,
            DeltaReason::NoChange
        );
    }
}
