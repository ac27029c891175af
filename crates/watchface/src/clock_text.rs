//! Human-readable time and date strings.

use alloc::string::{String, ToString};
use chrono::NaiveDateTime;

/// Date line, e.g. `"Mon,  4 September"`.
const DATE_FORMAT: &str = "%a, %e %B";
/// 24-hour time, e.g. `"16:05"`.
const TIME_FORMAT_24H: &str = "%R";
/// 12-hour time, e.g. `" 4:05"`.
const TIME_FORMAT_12H: &str = "%l:%M";
/// Lowercase meridiem, `"am"` / `"pm"`.
const AM_PM_FORMAT: &str = "%P";

/// Text layers of one watchface frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClockText {
    /// Time of day
    pub time: String,
    /// Weekday, day of month and month name
    pub date: String,
    /// Meridiem marker, only in 12-hour style
    pub am_pm: Option<String>,
}

impl ClockText {
    /// Format `local` in the user's preferred style.
    pub fn format(local: &NaiveDateTime, clock_24h: bool) -> Self {
        let date = local.format(DATE_FORMAT).to_string();
        if clock_24h {
            Self {
                time: local.format(TIME_FORMAT_24H).to_string(),
                date,
                am_pm: None,
            }
        } else {
            Self {
                time: local.format(TIME_FORMAT_12H).to_string(),
                date,
                am_pm: Some(local.format(AM_PM_FORMAT).to_string()),
            }
        }
    }
}
