use serde::{Deserialize, Serialize};

pub const MIN_CUT_COUNT: u8 = 1;
pub const MAX_CUT_COUNT: u8 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CutType {
    Straight,
    Diagonal,
    Curve,
}

impl Default for CutType {
    fn default() -> Self {
        CutType::Straight
    }
}

/// Display label for a cut count. Four bands of two cut counts each.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        DifficultyLevel::Easy
    }
}

impl DifficultyLevel {
    pub fn from_cut_count(cut_count: u8) -> DifficultyLevel {
        match cut_count {
            0..=2 => DifficultyLevel::Easy,
            3..=4 => DifficultyLevel::Medium,
            5..=6 => DifficultyLevel::Hard,
            _ => DifficultyLevel::Extreme,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DifficultyConfig {
    pub cut_count: u8,
    #[serde(default)]
    pub cut_type: CutType,
    pub actual_pieces: u32,
    pub difficulty_level: DifficultyLevel,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        DifficultyConfig::new(MIN_CUT_COUNT, CutType::Straight, 4)
    }
}

impl DifficultyConfig {
    pub fn new(cut_count: u8, cut_type: CutType, actual_pieces: u32) -> Self {
        Self {
            cut_count,
            cut_type,
            actual_pieces,
            difficulty_level: DifficultyLevel::from_cut_count(cut_count),
        }
    }

    /// Numeric level used as the key into every per-level lookup table.
    pub fn level(&self) -> u8 {
        self.cut_count
    }

    pub fn is_known_level(&self) -> bool {
        (MIN_CUT_COUNT..=MAX_CUT_COUNT).contains(&self.cut_count)
    }
}
