use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::model::{HintPolicy, HintPolicyUpdate};
use crate::scoring::ScoringEngine;
use crate::session::{LiveScoreUpdater, DEFAULT_DEBOUNCE_WINDOW};

pub const ENV_FREE_HINTS: &str = "TILESCORE_FREE_HINTS";
pub const ENV_ZERO_HINT_BONUS: &str = "TILESCORE_ZERO_HINT_BONUS";
pub const ENV_EXCESS_HINT_PENALTY: &str = "TILESCORE_EXCESS_HINT_PENALTY";
pub const ENV_DEBOUNCE_MS: &str = "TILESCORE_DEBOUNCE_MS";

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SettingsError {
    #[display("could not access settings file: {_0}")]
    Io(std::io::Error),
    #[display("invalid settings JSON: {_0}")]
    Json(serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub hint_policy: HintPolicy,

    #[serde(default = "default_debounce_window_ms")]
    pub debounce_window_ms: u64,
}

fn default_version() -> u32 {
    1
}
fn default_debounce_window_ms() -> u64 {
    DEFAULT_DEBOUNCE_WINDOW.as_millis() as u64
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            hint_policy: HintPolicy::default(),
            debounce_window_ms: default_debounce_window_ms(),
        }
    }
}

fn parse_override<T: FromStr>(name: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(target: "settings", "Ignoring {name}={value:?}: not a valid number");
            None
        }
    }
}

impl Settings {
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut settings = serde_json::from_str::<Settings>(&contents)?;
        settings.migrate();
        Ok(settings)
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Settings::default()
            }
            Err(err) => {
                error!(target: "settings", "Failed to load {}: {err}", path.display());
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup` (variable name to raw value).
    /// Unparseable values are logged and skipped.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let update = HintPolicyUpdate {
            free_hints_per_game: parse_override(ENV_FREE_HINTS, lookup(ENV_FREE_HINTS)),
            zero_hint_bonus: parse_override(ENV_ZERO_HINT_BONUS, lookup(ENV_ZERO_HINT_BONUS)),
            excess_hint_penalty: parse_override(
                ENV_EXCESS_HINT_PENALTY,
                lookup(ENV_EXCESS_HINT_PENALTY),
            ),
        };
        self.hint_policy = self.hint_policy.with_update(&update);
        if let Some(window) = parse_override(ENV_DEBOUNCE_MS, lookup(ENV_DEBOUNCE_MS)) {
            self.debounce_window_ms = window;
        }
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }

    pub fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.hint_policy)
    }

    pub fn live_updater(&self) -> LiveScoreUpdater {
        LiveScoreUpdater::new(self.engine(), self.debounce_window())
    }
}
