pub use crate::model::CHECKMARK;

const MINUTE: i64 = 60;
const HOUR: i64 = 3600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const YEAR: i64 = 31_536_000;

/// Compact remaining-time text for status bars: seconds, then minutes, then
/// one-decimal hours, days, weeks and years as the horizon grows.
pub fn human_remaining(seconds: i64) -> String {
    let s = seconds.max(0);
    if s < MINUTE {
        format!("{s}s")
    } else if s < HOUR {
        format!("{}m", s / MINUTE)
    } else if s < DAY {
        format!("{:.1}h", s as f64 / HOUR as f64)
    } else if s < WEEK {
        format!("{:.1}d", s as f64 / DAY as f64)
    } else if s < YEAR {
        format!("{:.1}w", s as f64 / WEEK as f64)
    } else {
        format!("{:.1}y", s as f64 / YEAR as f64)
    }
}

/// Zero-padded `HH:MM:SS` with unbounded hours.
pub fn clock_remaining(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / HOUR, (s % HOUR) / MINUTE, s % MINUTE)
}

/// Long-range entries get a calendar, near ones an hourglass.
pub fn icon_for(seconds: i64) -> &'static str {
    if seconds >= DAY { "📅" } else { "⏳" }
}
