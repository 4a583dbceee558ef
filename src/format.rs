use std::time::Duration;

/// Thousands-separated score, e.g. `12,345`.
pub fn format_score(score: i64) -> String {
    let digits = score.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if score < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// `mm:ss`, or `hh:mm:ss` once an hour has passed. Partial seconds are
/// dropped, so a sub-second session reads `00:00`.
pub fn format_time(duration: Duration) -> String {
    let (minutes, seconds) = (duration.as_secs() / 60, duration.as_secs() % 60);
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes:02}:{seconds:02}"),
        (hours, minutes) => format!("{hours:02}:{minutes:02}:{seconds:02}"),
    }
}
