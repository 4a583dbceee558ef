use serde::{Deserialize, Serialize};

pub const DEFAULT_FREE_HINTS_PER_GAME: u32 = 3;
pub const DEFAULT_ZERO_HINT_BONUS: i64 = 500;
pub const DEFAULT_EXCESS_HINT_PENALTY: i64 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintPolicy {
    #[serde(default = "default_free_hints")]
    pub free_hints_per_game: u32,
    #[serde(default = "default_zero_hint_bonus")]
    pub zero_hint_bonus: i64,
    #[serde(default = "default_excess_hint_penalty")]
    pub excess_hint_penalty: i64,
}

fn default_free_hints() -> u32 {
    DEFAULT_FREE_HINTS_PER_GAME
}
fn default_zero_hint_bonus() -> i64 {
    DEFAULT_ZERO_HINT_BONUS
}
fn default_excess_hint_penalty() -> i64 {
    DEFAULT_EXCESS_HINT_PENALTY
}

impl Default for HintPolicy {
    fn default() -> Self {
        HintPolicy {
            free_hints_per_game: DEFAULT_FREE_HINTS_PER_GAME,
            zero_hint_bonus: DEFAULT_ZERO_HINT_BONUS,
            excess_hint_penalty: DEFAULT_EXCESS_HINT_PENALTY,
        }
    }
}

/// Partial override; unset fields keep the current value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HintPolicyUpdate {
    #[serde(default)]
    pub free_hints_per_game: Option<u32>,
    #[serde(default)]
    pub zero_hint_bonus: Option<i64>,
    #[serde(default)]
    pub excess_hint_penalty: Option<i64>,
}

impl HintPolicy {
    pub fn with_update(&self, update: &HintPolicyUpdate) -> HintPolicy {
        HintPolicy {
            free_hints_per_game: update
                .free_hints_per_game
                .unwrap_or(self.free_hints_per_game),
            zero_hint_bonus: update.zero_hint_bonus.unwrap_or(self.zero_hint_bonus),
            excess_hint_penalty: update
                .excess_hint_penalty
                .unwrap_or(self.excess_hint_penalty),
        }
    }
}
