//! Display text for list rows.

use crate::model::record::EpochMillis;
use chrono::{DateTime, TimeZone, Utc};

const ROW_TIME_FORMAT: &str = "%d/%m/%Y %I:%M %p";
/// Shown for timestamps beyond chrono's calendar range.
const UNKNOWN_TIME: &str = "--/--/---- --:-- --";

/// Header caption, e.g. `Recently cooked` or `Cooked before 3 days`.
///
/// `verb` is the past-tense activity shown in the caption.
pub fn header_label(day_number: usize, verb: &str) -> String {
    let verb = capitalize(verb.trim());
    if day_number == 0 {
        return format!("Recently {}", verb.to_lowercase());
    }
    let unit = if day_number == 1 { "day" } else { "days" };
    format!("{verb} before {day_number} {unit}")
}

/// Formats a row timestamp as `dd/MM/yyyy hh:mm AM` in `tz`.
///
/// Timestamps chrono cannot place on a calendar render as a dashed
/// placeholder instead of a misleading date.
pub fn format_timestamp<Tz>(ts: EpochMillis, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    i64::try_from(ts)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|utc| utc.with_timezone(tz).format(ROW_TIME_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
