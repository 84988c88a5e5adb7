use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::warn;

// ── Export timestamp format ───────────────────────────────────────────────────

/// The timestamp format written by the tracker app's CSV export.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Hour (inclusive) at which the night phase begins.
pub const NIGHT_START_HOUR: u32 = 18;

/// Hour (exclusive) at which the night phase ends.
pub const NIGHT_END_HOUR: u32 = 6;

/// Parse a timestamp string from the export into a naive datetime.
///
/// The export writes minute precision (`2024-01-15 19:30`); a couple of
/// seconds-bearing and date-only fallbacks are accepted for hand-edited
/// files.  Returns `None` for empty or unrecognised strings.
pub fn parse_export_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    const FORMATS: &[&str] = &[
        EXPORT_DATE_FORMAT,
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    // Date-only rows are pinned to midnight (growth entries sometimes carry
    // no time component).
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    warn!("Could not parse export timestamp \"{}\"", trimmed);
    None
}

// ── Day / night classification ────────────────────────────────────────────────

/// Returns `true` when `hour` falls in the night window `[18, 24) ∪ [0, 6)`.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR
}

/// Assign a timestamp to its night bucket.
///
/// A night is named after the calendar day on which its evening began:
/// a start at or after 18:00 belongs to that date's night, a start before
/// 06:00 belongs to the previous date's night.  Daytime starts have no
/// night bucket.
pub fn night_bucket(start: NaiveDateTime) -> Option<NaiveDate> {
    let hour = start.hour();
    if hour >= NIGHT_START_HOUR {
        Some(start.date())
    } else if hour < NIGHT_END_HOUR {
        start.date().pred_opt()
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
