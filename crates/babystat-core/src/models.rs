use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::time_utils::{is_night_hour, night_bucket};

/// Category of a logged baby-care event, parsed from the export's `Type`
/// column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Sleep,
    Feed,
    Diaper,
    Growth,
    /// Any category this dashboard has no dedicated handling for
    /// (e.g. "Pump", "Solids").  Kept verbatim so counts still work.
    Other(String),
}

impl EventKind {
    /// Parse the export's `Type` column value (case-insensitive).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "sleep" => EventKind::Sleep,
            "feed" => EventKind::Feed,
            "diaper" => EventKind::Diaper,
            "growth" => EventKind::Growth,
            _ => EventKind::Other(raw.trim().to_string()),
        }
    }

    /// Canonical display label.
    pub fn label(&self) -> &str {
        match self {
            EventKind::Sleep => "Sleep",
            EventKind::Feed => "Feed",
            EventKind::Diaper => "Diaper",
            EventKind::Growth => "Growth",
            EventKind::Other(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether an event's midpoint fell in the day or the night window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    pub fn label(&self) -> &'static str {
        match self {
            DayPhase::Day => "Day",
            DayPhase::Night => "Night",
        }
    }
}

/// A single logged event read from one row of the CSV export.
///
/// Immutable once loaded; all derived values (duration, phase, night
/// bucket) are computed on demand from the raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event category.
    pub kind: EventKind,
    /// When the event began.  The export carries naive local time.
    pub start: NaiveDateTime,
    /// When the event ended; open-ended or instantaneous events have none.
    pub end: Option<NaiveDateTime>,
    /// Free-text `Start Condition` column (weight reading for growth rows).
    pub start_condition: Option<String>,
    /// Free-text `Start Location` column (height reading for growth rows).
    pub start_location: Option<String>,
    /// Free-text `End Condition` column (head circumference for growth rows).
    pub end_condition: Option<String>,
    /// Free-text notes column.
    pub notes: Option<String>,
}

impl EventRecord {
    /// Elapsed time between start and end.
    ///
    /// Returns `None` when the record has no end or when the end precedes
    /// the start (a corrupt row the caller should skip, not trust).
    pub fn duration(&self) -> Option<Duration> {
        let end = self.end?;
        let dur = end - self.start;
        (dur >= Duration::zero()).then_some(dur)
    }

    /// Duration in fractional minutes, `None` when [`duration`] is `None`.
    ///
    /// [`duration`]: EventRecord::duration
    pub fn duration_minutes(&self) -> Option<f64> {
        self.duration().map(|d| d.num_seconds() as f64 / 60.0)
    }

    /// Calendar day on which the event began.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Calendar day on which the event ended, if it has an end.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|e| e.date())
    }

    /// Temporal midpoint of the event, `None` without a valid duration.
    pub fn midpoint(&self) -> Option<NaiveDateTime> {
        let dur = self.duration()?;
        Some(self.start + dur / 2)
    }

    /// Day/night classification by the midpoint's hour.
    ///
    /// Records without a valid duration cannot be classified.
    pub fn day_phase(&self) -> Option<DayPhase> {
        let mid = self.midpoint()?;
        if is_night_hour(mid.hour()) {
            Some(DayPhase::Night)
        } else {
            Some(DayPhase::Day)
        }
    }

    /// The night bucket this record belongs to, by its start time.
    ///
    /// See [`crate::time_utils::night_bucket`] for the convention.
    pub fn night_of(&self) -> Option<NaiveDate> {
        night_bucket(self.start)
    }
}

/// One growth reading extracted from a growth record's condition columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthSample {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_cm: Option<f64>,
}

/// The full, ordered set of records loaded atomically from one export.
///
/// The table is created once per run and never mutated; the trim/filter
/// operations return a new table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventTable {
    records: Vec<EventRecord>,
}

impl EventTable {
    /// Build a table, ordering records by start time.
    pub fn new(mut records: Vec<EventRecord>) -> Self {
        records.sort_by_key(|r| r.start);
        Self { records }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest start date in the table.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.start_date())
    }

    /// Latest end date (falling back to start date) in the table.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.end_date().unwrap_or_else(|| r.start_date()))
            .max()
    }

    /// Drop the incomplete first and last calendar day of the export.
    ///
    /// The tracker exports whatever window the user selected, so the
    /// boundary days rarely hold a full 24 hours of records and would skew
    /// the daily aggregates.  Records starting on the first day, or ending
    /// on the last day with an end recorded, are removed.
    pub fn trim_partial_days(&self) -> EventTable {
        let Some(first) = self.records.iter().map(|r| r.start_date()).min() else {
            return EventTable::default();
        };
        let last = self.records.iter().filter_map(|r| r.end_date()).max();

        let kept: Vec<EventRecord> = self
            .records
            .iter()
            .filter(|r| r.start_date() > first)
            .filter(|r| match (r.end_date(), last) {
                (Some(end), Some(last)) => end < last,
                _ => true,
            })
            .cloned()
            .collect();

        EventTable { records: kept }
    }

    /// Keep only records starting on or after `date`.
    pub fn filter_from(&self, date: NaiveDate) -> EventTable {
        let kept: Vec<EventRecord> = self
            .records
            .iter()
            .filter(|r| r.start_date() >= date)
            .cloned()
            .collect();
        EventTable { records: kept }
    }

    /// Iterate over records of one category.
    pub fn of_kind<'a>(&'a self, kind: &'a EventKind) -> impl Iterator<Item = &'a EventRecord> {
        self.records.iter().filter(move |r| &r.kind == kind)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
