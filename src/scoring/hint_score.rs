use crate::model::{DifficultyConfig, HintPolicy, Scored, ScoringWarning};

/// Free hints granted for a difficulty. Every known level currently gets the
/// same allowance; anything outside the table gets none.
pub fn hint_allowance(difficulty: &DifficultyConfig, policy: &HintPolicy) -> Scored<u32> {
    if difficulty.is_known_level() {
        Scored::clean(policy.free_hints_per_game)
    } else {
        Scored::with_warning(
            0,
            ScoringWarning::UnknownCutCount {
                cut_count: difficulty.cut_count,
            },
        )
    }
}

/// Penalizes each hint beyond the allowance. `None` when the penalty
/// overflows `i64`.
pub fn calculate_hint_score(
    actual_hints: u32,
    allowance: u32,
    policy: &HintPolicy,
) -> Option<i64> {
    if actual_hints == 0 {
        Some(policy.zero_hint_bonus)
    } else if actual_hints <= allowance {
        Some(0)
    } else {
        i64::from(actual_hints - allowance)
            .checked_mul(policy.excess_hint_penalty)?
            .checked_neg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CutType, HintPolicyUpdate, MAX_CUT_COUNT, MIN_CUT_COUNT};

    #[test]
    fn test_zero_hints_always_earn_bonus() {
        let policy = HintPolicy::default();
        for allowance in [0, 1, 3, 10] {
            assert_eq!(
                calculate_hint_score(0, allowance, &policy),
                Some(policy.zero_hint_bonus)
            );
        }
    }

    #[test]
    fn test_within_allowance_is_neutral() {
        let policy = HintPolicy::default();
        for hints in 1..=3 {
            assert_eq!(calculate_hint_score(hints, 3, &policy), Some(0));
        }
    }

    #[test]
    fn test_excess_hints_penalized_per_hint() {
        let policy = HintPolicy::default();
        assert_eq!(calculate_hint_score(4, 3, &policy), Some(-100));
        assert_eq!(calculate_hint_score(7, 3, &policy), Some(-400));
        assert_eq!(calculate_hint_score(2, 0, &policy), Some(-200));
    }

    #[test]
    fn test_policy_override() {
        let policy = HintPolicy::default().with_update(&HintPolicyUpdate {
            zero_hint_bonus: Some(300),
            excess_hint_penalty: Some(25),
            ..Default::default()
        });
        assert_eq!(calculate_hint_score(0, 3, &policy), Some(300));
        assert_eq!(calculate_hint_score(5, 3, &policy), Some(-50));
    }

    #[test]
    fn test_huge_penalty_overflows_to_none() {
        let policy = HintPolicy {
            excess_hint_penalty: i64::MAX / 2,
            ..HintPolicy::default()
        };
        assert_eq!(calculate_hint_score(6, 3, &policy), None);
        assert_eq!(calculate_hint_score(1, 3, &policy), Some(0));
    }

    #[test]
    fn test_allowance_lookup() {
        let policy = HintPolicy::default();
        for cut_count in MIN_CUT_COUNT..=MAX_CUT_COUNT {
            let difficulty = DifficultyConfig::new(cut_count, CutType::Straight, 4);
            let allowance = hint_allowance(&difficulty, &policy);
            assert!(allowance.is_clean());
            assert_eq!(allowance.value, policy.free_hints_per_game);
        }
        let unknown = hint_allowance(&DifficultyConfig::new(9, CutType::Curve, 100), &policy);
        assert_eq!(unknown.value, 0);
        assert_eq!(
            unknown.warnings,
            vec![ScoringWarning::UnknownCutCount { cut_count: 9 }]
        );
    }
}
