use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tilescore::format::{format_score, format_time};
use tilescore::model::{GameRecord, GameplayStats, PuzzlePieceState, ScoreBreakdown};
use tilescore::scoring::{check_time_record, format_rank_display, new_record_badge};
use tilescore::settings::Settings;

#[derive(Parser)]
#[command(name = "tilescore", version, about = "Score a finished tile-puzzle session")]
struct Args {
    /// Session snapshot: stats, pieces and leaderboard as JSON
    session: PathBuf,
    /// Settings file; missing or invalid files fall back to defaults
    settings: Option<PathBuf>,
}

/// Session snapshot handed over by the game layer.
#[derive(Debug, Deserialize)]
struct SessionInput {
    stats: GameplayStats,
    #[serde(default)]
    pieces: Vec<PuzzlePieceState>,
    #[serde(default)]
    leaderboard: Vec<GameRecord>,
}

#[derive(Debug, Serialize)]
struct Report {
    breakdown: ScoreBreakdown,
    score: String,
    time: String,
    rank: String,
    badge: Option<&'static str>,
}

fn init_logging() {
    env_logger::init();
}

fn score_session(session_path: &Path, settings_path: Option<&Path>) -> anyhow::Result<String> {
    let mut settings = settings_path
        .map(Settings::load_or_default)
        .unwrap_or_default();
    settings.apply_env_overrides();

    let contents = fs::read_to_string(session_path)
        .with_context(|| format!("could not read {}", session_path.display()))?;
    let input: SessionInput = serde_json::from_str(&contents)
        .with_context(|| format!("invalid session file {}", session_path.display()))?;

    let breakdown = settings
        .engine()
        .calculate_final_score(&input.stats, &input.pieces, &input.leaderboard);
    let record_check = check_time_record(
        input.stats.total_duration,
        input.stats.difficulty.level(),
        &input.leaderboard,
    );
    let report = Report {
        score: format_score(i64::from(breakdown.final_score)),
        time: format_time(input.stats.total_duration),
        rank: format_rank_display(&record_check),
        badge: new_record_badge(&record_check),
        breakdown,
    };
    serde_json::to_string_pretty(&report).context("could not serialize report")
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let report = score_session(&args.session, args.settings.as_deref())?;
    println!("{report}");
    Ok(())
}
