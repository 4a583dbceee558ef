use derive_more::{Display, Error};
use serde::Serialize;

use crate::model::{Scored, ScoringWarning};

pub const PERFECT_BONUS: i64 = 500;
pub const EXCESS_PENALTY: i64 = 10;
pub const MAX_ACTUAL_ROTATIONS: i64 = 1000;
pub const MAX_MIN_ROTATIONS: i64 = 100;

pub const PERFECT_TEXT_KEY: &str = "rotation.perfect";
pub const EXCESS_TEXT_KEY: &str = "rotation.excess";

/// Efficiency floor (percent) and score for each legacy tier, best first.
const LEGACY_TIERS: [(f64, i64); 5] = [
    (100.0, 200),
    (80.0, 100),
    (60.0, 50),
    (40.0, -50),
    (20.0, -100),
];
const LEGACY_FLOOR_SCORE: i64 = -200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RotationField {
    #[display("actual rotations")]
    Actual,
    #[display("minimum rotations")]
    Minimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RotationValidationError {
    #[display("{field} must not be negative (got {value})")]
    Negative { field: RotationField, value: i64 },
    #[display("{field} must be at most {max} (got {value})")]
    AboveLimit {
        field: RotationField,
        value: i64,
        max: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Gold,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationScore {
    pub actual_rotations: i64,
    pub min_rotations: i64,
    pub is_perfect: bool,
    /// Negative when the player used fewer rotations than the computed minimum.
    pub excess_rotations: i64,
    pub score: i64,
    pub display_text: String,
    pub display_color: DisplayColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("could not translate {key}: {reason}")]
pub struct TranslationError {
    pub key: String,
    pub reason: String,
}

impl TranslationError {
    pub fn missing(key: &str) -> Self {
        Self {
            key: key.to_string(),
            reason: "no translation".to_string(),
        }
    }
}

/// Caller-supplied text lookup. Failures never reach the player; the scorer
/// falls back to its built-in text.
pub trait Translator {
    fn translate(&self, key: &str, params: &[(&str, String)]) -> Result<String, TranslationError>;
}

impl<F> Translator for F
where
    F: Fn(&str, &[(&str, String)]) -> Result<String, TranslationError>,
{
    fn translate(&self, key: &str, params: &[(&str, String)]) -> Result<String, TranslationError> {
        self(key, params)
    }
}

fn validate(value: i64, max: i64, field: RotationField) -> Result<(), RotationValidationError> {
    if value < 0 {
        return Err(RotationValidationError::Negative { field, value });
    }
    if value > max {
        return Err(RotationValidationError::AboveLimit { field, value, max });
    }
    Ok(())
}

fn default_text(actual: i64, min: i64, excess: i64, is_perfect: bool) -> String {
    if is_perfect {
        format!("Perfect rotation! {actual} rotations (minimum {min})")
    } else {
        format!("{actual} rotations, {excess} over the minimum of {min}")
    }
}

/// Primary bonus/penalty algorithm. Invalid telemetry is returned as an error
/// so the caller can decide whether to use `legacy_rotation_score` instead.
pub fn calculate_score(actual: i64, min: i64) -> Result<RotationScore, RotationValidationError> {
    validate(actual, MAX_ACTUAL_ROTATIONS, RotationField::Actual)?;
    validate(min, MAX_MIN_ROTATIONS, RotationField::Minimum)?;

    let (is_perfect, excess) = if min == 0 {
        (actual == 0, actual)
    } else if actual == min {
        (true, 0)
    } else {
        (false, actual - min)
    };
    let score = if is_perfect {
        PERFECT_BONUS
    } else {
        -excess * EXCESS_PENALTY
    };

    Ok(RotationScore {
        actual_rotations: actual,
        min_rotations: min,
        is_perfect,
        excess_rotations: excess,
        score,
        display_text: default_text(actual, min, excess, is_perfect),
        display_color: if is_perfect {
            DisplayColor::Gold
        } else {
            DisplayColor::Red
        },
    })
}

fn non_empty(key: &str, text: String) -> Result<String, TranslationError> {
    if text.trim().is_empty() {
        return Err(TranslationError {
            key: key.to_string(),
            reason: "empty translation".to_string(),
        });
    }
    Ok(text)
}

/// Translator checked once against a known key when it is handed over.
/// A translator that fails the check is kept but never consulted.
pub struct ValidatedTranslator<T> {
    inner: T,
    status: Result<(), TranslationError>,
}

impl<T: Translator> ValidatedTranslator<T> {
    pub fn new(inner: T) -> Self {
        let status = inner
            .translate(
                PERFECT_TEXT_KEY,
                &[("actual", "0".to_string()), ("min", "0".to_string())],
            )
            .and_then(|text| non_empty(PERFECT_TEXT_KEY, text))
            .map(|_| ());
        Self { inner, status }
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_ok()
    }

    fn text_for(&self, result: &RotationScore) -> Result<String, TranslationError> {
        self.status.clone()?;
        let params = [
            ("actual", result.actual_rotations.to_string()),
            ("min", result.min_rotations.to_string()),
            ("excess", result.excess_rotations.to_string()),
        ];
        let key = if result.is_perfect {
            PERFECT_TEXT_KEY
        } else {
            EXCESS_TEXT_KEY
        };
        non_empty(key, self.inner.translate(key, &params)?)
    }
}

/// `calculate_score` with display text from `translator`. Numeric validation
/// still fails loudly; translation problems only swap in the default text.
pub fn calculate_score_localized<T: Translator>(
    actual: i64,
    min: i64,
    translator: &ValidatedTranslator<T>,
) -> Result<Scored<RotationScore>, RotationValidationError> {
    let mut result = calculate_score(actual, min)?;
    match translator.text_for(&result) {
        Ok(text) => {
            result.display_text = text;
            Ok(Scored::clean(result))
        }
        Err(err) => Ok(Scored::with_warning(
            result,
            ScoringWarning::TranslationDegraded {
                reason: err.to_string(),
            },
        )),
    }
}

/// `min / actual` as a percentage. Both zero counts as 100%.
pub fn rotation_efficiency_percent(actual: i64, min: i64) -> f64 {
    if actual == 0 {
        return if min == 0 { 100.0 } else { 0.0 };
    }
    min as f64 / actual as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegacyRotationScore {
    pub efficiency_percent: f64,
    pub score: i64,
}

/// Percentage-tier scoring kept for inputs the primary algorithm rejects.
pub fn legacy_rotation_score(actual: i64, min: i64) -> LegacyRotationScore {
    let efficiency_percent = rotation_efficiency_percent(actual, min);
    let score = LEGACY_TIERS
        .iter()
        .find(|(floor, _)| efficiency_percent >= *floor)
        .map(|(_, score)| *score)
        .unwrap_or(LEGACY_FLOOR_SCORE);
    LegacyRotationScore {
        efficiency_percent,
        score,
    }
}

/// Rotation term for aggregation: primary algorithm, or the legacy tiers
/// when the primary rejects its input.
pub fn rotation_score_with_fallback(actual: i64, min: i64) -> Scored<i64> {
    match calculate_score(actual, min) {
        Ok(result) if result.excess_rotations < 0 => Scored::with_warning(
            result.score,
            ScoringWarning::UnderMinimumRotations { actual, min },
        ),
        Ok(result) => Scored::clean(result.score),
        Err(err) => Scored::with_warning(
            legacy_rotation_score(actual, min).score,
            ScoringWarning::LegacyRotationFallback {
                reason: err.to_string(),
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn spanish(key: &str, params: &[(&str, String)]) -> Result<String, TranslationError> {
        let actual = params
            .iter()
            .find(|(name, _)| *name == "actual")
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        match key {
            PERFECT_TEXT_KEY => Ok(format!("¡Perfecto! {actual} giros")),
            EXCESS_TEXT_KEY => Ok(format!("{actual} giros")),
            _ => Err(TranslationError::missing(key)),
        }
    }

    fn blank(_key: &str, _params: &[(&str, String)]) -> Result<String, TranslationError> {
        Ok(String::new())
    }

    struct FailsOnExcess;

    impl Translator for FailsOnExcess {
        fn translate(
            &self,
            key: &str,
            _params: &[(&str, String)],
        ) -> Result<String, TranslationError> {
            if key == EXCESS_TEXT_KEY {
                Err(TranslationError::missing(key))
            } else {
                Ok("ok".to_string())
            }
        }
    }

    #[test]
    fn test_perfect_when_actual_equals_min() {
        for min in [0, 1, 4, 57, 100] {
            let result = calculate_score(min, min).unwrap();
            assert!(result.is_perfect);
            assert_eq!(result.score, PERFECT_BONUS);
            assert_eq!(result.display_color, DisplayColor::Gold);
        }
    }

    #[test]
    fn test_excess_is_linear() {
        for (actual, min) in [(5, 4), (8, 4), (100, 12), (1000, 100)] {
            let result = calculate_score(actual, min).unwrap();
            assert!(!result.is_perfect);
            assert_eq!(result.excess_rotations, actual - min);
            assert_eq!(result.score, -(actual - min) * EXCESS_PENALTY);
            assert_eq!(result.display_color, DisplayColor::Red);
        }
    }

    #[test]
    fn test_zero_min_with_rotations_counts_every_rotation() {
        let result = calculate_score(7, 0).unwrap();
        assert!(!result.is_perfect);
        assert_eq!(result.excess_rotations, 7);
        assert_eq!(result.score, -70);
    }

    #[test]
    fn test_under_minimum_is_not_rejected() {
        let result = calculate_score(2, 5).unwrap();
        assert_eq!(result.excess_rotations, -3);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            calculate_score(-1, 0),
            Err(RotationValidationError::Negative {
                field: RotationField::Actual,
                value: -1
            })
        );
        assert_eq!(
            calculate_score(1001, 4),
            Err(RotationValidationError::AboveLimit {
                field: RotationField::Actual,
                value: 1001,
                max: MAX_ACTUAL_ROTATIONS
            })
        );
        assert!(matches!(
            calculate_score(10, 101),
            Err(RotationValidationError::AboveLimit {
                field: RotationField::Minimum,
                ..
            })
        ));
        assert_eq!(
            calculate_score(3, -2).unwrap_err().to_string(),
            "minimum rotations must not be negative (got -2)"
        );
    }

    #[test]
    fn test_legacy_tiers() {
        assert_eq!(legacy_rotation_score(0, 0).score, 200);
        assert_eq!(legacy_rotation_score(0, 3).score, -200);
        assert_eq!(legacy_rotation_score(10, 10).score, 200);
        assert_eq!(legacy_rotation_score(10, 8).score, 100);
        assert_eq!(legacy_rotation_score(10, 6).score, 50);
        assert_eq!(legacy_rotation_score(10, 4).score, -50);
        assert_eq!(legacy_rotation_score(10, 2).score, -100);
        assert_eq!(legacy_rotation_score(10, 1).score, -200);
    }

    #[test]
    fn test_fallback_uses_legacy_on_invalid_min() {
        let scored = rotation_score_with_fallback(150, 150);
        assert_eq!(scored.value, 200);
        assert!(matches!(
            scored.warnings.as_slice(),
            [ScoringWarning::LegacyRotationFallback { .. }]
        ));

        let scored = rotation_score_with_fallback(8, 4);
        assert_eq!(scored.value, -40);
        assert!(scored.is_clean());
    }

    #[test]
    fn test_localized_text() {
        let translator = ValidatedTranslator::new(spanish);
        assert!(translator.is_valid());
        let scored = calculate_score_localized(4, 4, &translator).unwrap();
        assert!(scored.is_clean());
        assert_eq!(scored.value.display_text, "¡Perfecto! 4 giros");
        assert_eq!(scored.value.score, PERFECT_BONUS);
    }

    #[test]
    fn test_localized_degrades_on_blank_translator() {
        let translator = ValidatedTranslator::new(blank);
        assert!(!translator.is_valid());
        let scored = calculate_score_localized(8, 4, &translator).unwrap();
        assert_eq!(scored.value, calculate_score(8, 4).unwrap());
        assert!(matches!(
            scored.warnings.as_slice(),
            [ScoringWarning::TranslationDegraded { .. }]
        ));
    }

    #[test]
    fn test_localized_degrades_when_formatting_fails() {
        let translator = ValidatedTranslator::new(FailsOnExcess);
        assert!(translator.is_valid());
        let scored = calculate_score_localized(9, 4, &translator).unwrap();
        assert_eq!(scored.value.score, -50);
        assert_eq!(scored.value.display_text, calculate_score(9, 4).unwrap().display_text);
        assert!(!scored.is_clean());
    }

    #[test]
    fn test_localized_still_rejects_invalid_counts() {
        let translator = ValidatedTranslator::new(spanish);
        assert!(calculate_score_localized(-3, 0, &translator).is_err());
    }

    #[test]
    fn test_translator_checked_once() {
        struct Counting<'a>(&'a Cell<u32>);

        impl Translator for Counting<'_> {
            fn translate(
                &self,
                key: &str,
                params: &[(&str, String)],
            ) -> Result<String, TranslationError> {
                self.0.set(self.0.get() + 1);
                spanish(key, params)
            }
        }

        let calls = Cell::new(0);
        let translator = ValidatedTranslator::new(Counting(&calls));
        assert_eq!(calls.get(), 1);
        for actual in [4, 5, 6] {
            calculate_score_localized(actual, 4, &translator).unwrap();
        }
        assert_eq!(calls.get(), 4);
    }
}
