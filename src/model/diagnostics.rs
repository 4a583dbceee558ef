use derive_more::Display;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTerm {
    #[display("base score")]
    BaseScore,
    #[display("time bonus")]
    TimeBonus,
    #[display("rotation score")]
    RotationScore,
    #[display("hint score")]
    HintScore,
    #[display("difficulty multiplier")]
    DifficultyMultiplier,
}

/// Non-fatal conditions met while scoring. Returned next to the value instead
/// of being logged from inside the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringWarning {
    #[display("no table entry for difficulty level {level}, using default {fallback}")]
    UnknownLevel { level: u8, fallback: f64 },
    #[display("no hint allowance for cut count {cut_count}, using 0")]
    UnknownCutCount { cut_count: u8 },
    #[display("shape type missing, using coefficient 1.0")]
    MissingShapeType,
    #[display("minimum rotations not captured yet")]
    MinRotationsUnknown,
    #[display("rotation input rejected ({reason}), scored with legacy tiers")]
    LegacyRotationFallback { reason: String },
    #[display("{actual} rotations is below the computed minimum of {min}")]
    UnderMinimumRotations { actual: i64, min: i64 },
    #[display("translation unavailable ({reason}), using default text")]
    TranslationDegraded { reason: String },
    #[display("{term} degraded to 0: {reason}")]
    TermDegraded { term: ScoreTerm, reason: String },
    #[display("{remaining} pieces still incomplete at final scoring")]
    IncompletePieces { remaining: usize },
    #[display("score computation failed ({reason}), using fallback {fallback}")]
    FallbackScore { reason: String, fallback: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    pub value: T,
    pub warnings: Vec<ScoringWarning>,
}

impl<T> Scored<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: ScoringWarning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Moves the warnings into `sink` and hands back the value.
    pub fn collect_into(self, sink: &mut Vec<ScoringWarning>) -> T {
        sink.extend(self.warnings);
        self.value
    }
}
