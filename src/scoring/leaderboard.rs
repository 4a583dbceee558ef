use chrono::{Local, TimeZone};
use itertools::Itertools;
use log::debug;
use serde::Serialize;
use std::time::Duration;

use crate::model::GameRecord;

pub const NEW_RECORD_BADGE: &str = "NEW RECORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRecordCheck {
    pub is_new_record: bool,
    /// 1-based position of the session among same-level records.
    pub rank: usize,
    /// Same-level records including the session being checked.
    pub total_records: usize,
}

/// Same-level records, fastest first.
pub fn records_for_level(leaderboard: &[GameRecord], level: u8) -> Vec<&GameRecord> {
    leaderboard
        .iter()
        .filter(|record| record.level() == level)
        .sorted_by(|a, b| a.total_duration.cmp(&b.total_duration))
        .collect()
}

pub fn best_record(leaderboard: &[GameRecord], level: u8) -> Option<&GameRecord> {
    leaderboard
        .iter()
        .filter(|record| record.level() == level)
        .min_by_key(|record| record.total_duration)
}

pub fn top_records(leaderboard: &[GameRecord], level: u8, limit: usize) -> Vec<GameRecord> {
    records_for_level(leaderboard, level)
        .into_iter()
        .take(limit)
        .cloned()
        .collect()
}

/// Ranks `duration` against same-level history. Ties do not count as a new
/// record and share the better rank.
pub fn check_time_record(
    duration: Duration,
    level: u8,
    leaderboard: &[GameRecord],
) -> TimeRecordCheck {
    let same_level = records_for_level(leaderboard, level);
    let total_records = same_level.len() + 1;

    let check = match same_level.first() {
        None => TimeRecordCheck {
            is_new_record: true,
            rank: 1,
            total_records,
        },
        Some(best) if duration < best.total_duration => TimeRecordCheck {
            is_new_record: true,
            rank: 1,
            total_records,
        },
        Some(_) => TimeRecordCheck {
            is_new_record: false,
            rank: 1 + same_level
                .iter()
                .filter(|record| record.total_duration < duration)
                .count(),
            total_records,
        },
    };
    debug!(
        target: "leaderboard",
        "Level {} time {:?} ranked {}/{} (new record: {})",
        level,
        duration,
        check.rank,
        check.total_records,
        check.is_new_record
    );
    check
}

pub fn format_rank_display(check: &TimeRecordCheck) -> String {
    format!("#{} / {}", check.rank, check.total_records)
}

pub fn new_record_badge(check: &TimeRecordCheck) -> Option<&'static str> {
    check.is_new_record.then_some(NEW_RECORD_BADGE)
}

pub fn format_record_date(timestamp: i64) -> String {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
