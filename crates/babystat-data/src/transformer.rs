//! Daily aggregation of loaded event records.
//!
//! Every function here is a pure transformation from an [`EventTable`] to
//! derived series, so the same table always yields the same output.

use std::collections::BTreeMap;

use babystat_core::error::{BabyStatError, Result};
use babystat_core::formatting::percentage;
use babystat_core::models::{DayPhase, EventKind, EventTable, GrowthSample};
use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, warn};

// ── Date sanity bounds ────────────────────────────────────────────────────────

const MIN_DATE: (i32, u32, u32) = (2000, 1, 1);
const MAX_DATE: (i32, u32, u32) = (2100, 1, 1);

/// Reject tables containing records with clearly corrupt dates.
///
/// Every record's start date must fall in `[2000-01-01, 2100-01-01)`; an
/// out-of-range date is a corrupt export and fails the whole run.
pub fn check_date_range(table: &EventTable) -> Result<()> {
    let min = NaiveDate::from_ymd_opt(MIN_DATE.0, MIN_DATE.1, MIN_DATE.2)
        .ok_or_else(|| BabyStatError::Config("invalid minimum date bound".to_string()))?;
    let max = NaiveDate::from_ymd_opt(MAX_DATE.0, MAX_DATE.1, MAX_DATE.2)
        .ok_or_else(|| BabyStatError::Config("invalid maximum date bound".to_string()))?;

    for record in table.records() {
        let date = record.start_date();
        if date < min || date >= max {
            return Err(BabyStatError::DateOutOfRange { date, min, max });
        }
    }
    Ok(())
}

// ── Daily metrics ─────────────────────────────────────────────────────────────

/// Aggregated stats for all records of one kind on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetric {
    pub date: NaiveDate,
    pub kind: EventKind,
    /// Sum of durations in minutes; records without a duration contribute 0.
    pub total_minutes: f64,
    /// Number of records, durationless ones included.
    pub count: u32,
    /// Mean duration in minutes over the records that have one.
    pub mean_minutes: Option<f64>,
}

/// Aggregate a table into one [`DailyMetric`] per `(date, kind)` pair that
/// has at least one record.
///
/// Days with no records of a kind produce no metric at all; downstream
/// consumers see gaps, never fabricated zeros.  Results are sorted by date,
/// then kind.
pub fn aggregate_daily(table: &EventTable) -> Vec<DailyMetric> {
    let mut buckets: BTreeMap<(NaiveDate, EventKind), (f64, u32, u32)> = BTreeMap::new();

    for record in table.records() {
        let entry = buckets
            .entry((record.start_date(), record.kind.clone()))
            .or_insert((0.0, 0, 0));
        entry.1 += 1;
        if let Some(mins) = record.duration_minutes() {
            entry.0 += mins;
            entry.2 += 1;
        }
    }

    let metrics: Vec<DailyMetric> = buckets
        .into_iter()
        .map(|((date, kind), (total, count, timed))| DailyMetric {
            date,
            kind,
            total_minutes: total,
            count,
            mean_minutes: (timed > 0).then(|| total / timed as f64),
        })
        .collect();

    debug!("Aggregated {} daily metrics", metrics.len());
    metrics
}

// ── Sleep series ──────────────────────────────────────────────────────────────

/// Total sleep per day, in hours.
pub fn sleep_hours_per_day(table: &EventTable) -> Vec<(NaiveDate, f64)> {
    aggregate_daily(table)
        .into_iter()
        .filter(|m| m.kind == EventKind::Sleep)
        .map(|m| (m.date, m.total_minutes / 60.0))
        .collect()
}

/// Mean sleep stretch per day, in hours, split by day/night phase.
///
/// Returns `(day_series, night_series)`.  Sleeps without a valid duration
/// cannot be phase-classified and are skipped.
pub fn sleep_phase_averages(
    table: &EventTable,
) -> (Vec<(NaiveDate, f64)>, Vec<(NaiveDate, f64)>) {
    let mut day: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    let mut night: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

    for record in table.of_kind(&EventKind::Sleep) {
        let (Some(mins), Some(phase)) = (record.duration_minutes(), record.day_phase()) else {
            continue;
        };
        let bucket = match phase {
            DayPhase::Day => &mut day,
            DayPhase::Night => &mut night,
        };
        let entry = bucket.entry(record.start_date()).or_insert((0.0, 0));
        entry.0 += mins;
        entry.1 += 1;
    }

    let mean_hours = |buckets: BTreeMap<NaiveDate, (f64, u32)>| {
        buckets
            .into_iter()
            .map(|(date, (total, n))| (date, total / n as f64 / 60.0))
            .collect()
    };

    (mean_hours(day), mean_hours(night))
}

/// Share of each day's sleep minutes that fell in night-phase stretches,
/// as a percentage per day, rounded to one decimal.
pub fn night_sleep_share(table: &EventTable) -> Vec<(NaiveDate, f64)> {
    let mut buckets: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for record in table.of_kind(&EventKind::Sleep) {
        let (Some(mins), Some(phase)) = (record.duration_minutes(), record.day_phase()) else {
            continue;
        };
        let entry = buckets.entry(record.start_date()).or_insert((0.0, 0.0));
        entry.0 += mins;
        if phase == DayPhase::Night {
            entry.1 += mins;
        }
    }

    buckets
        .into_iter()
        .filter(|(_, (total, _))| *total > 0.0)
        .map(|(date, (total, night))| (date, percentage(night, total, 1)))
        .collect()
}

/// Number of feeds per day.
pub fn feeds_per_day(table: &EventTable) -> Vec<(NaiveDate, f64)> {
    aggregate_daily(table)
        .into_iter()
        .filter(|m| m.kind == EventKind::Feed)
        .map(|m| (m.date, m.count as f64))
        .collect()
}

// ── Growth series ─────────────────────────────────────────────────────────────

/// Extract growth samples from the table's growth records.
///
/// The tracker stores readings as free text with a unit suffix
/// (`"4.5kg"`, `"55cm"`): weight in `Start Condition`, height in
/// `Start Location`, head circumference in `End Condition`.  Unparseable
/// values are skipped with a warning; a record with no parseable reading at
/// all is dropped.
pub fn growth_series(table: &EventTable) -> Vec<GrowthSample> {
    let value_re = Regex::new(r"^([0-9]+(?:[.,][0-9]+)?)\s*[a-zA-Z]*$").expect("regex is valid");

    let parse = |field: &Option<String>| -> Option<f64> {
        let raw = field.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match value_re.captures(raw) {
            Some(caps) => caps[1].replace(',', ".").parse().ok(),
            None => {
                warn!("Could not parse growth value \"{}\"", raw);
                None
            }
        }
    };

    table
        .of_kind(&EventKind::Growth)
        .filter_map(|record| {
            let sample = GrowthSample {
                date: record.start_date(),
                weight_kg: parse(&record.start_condition),
                height_cm: parse(&record.start_location),
                head_cm: parse(&record.end_condition),
            };
            (sample.weight_kg.is_some() || sample.height_cm.is_some() || sample.head_cm.is_some())
                .then_some(sample)
        })
        .collect()
}

// ── Night statistics ──────────────────────────────────────────────────────────

/// Aggregated sleep stats for one night bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct NightStats {
    /// Calendar day on which the night's evening began.
    pub night: NaiveDate,
    /// Mean night-phase stretch length, in minutes.
    pub mean_minutes: f64,
    /// Total night-phase sleep, in minutes.
    pub total_minutes: f64,
    /// Number of night-phase stretches.
    pub stretches: u32,
}

/// One night joined with the naps of the day that led into it.
#[derive(Debug, Clone, PartialEq)]
pub struct NightDayStats {
    pub night: NightStats,
    /// Number of day-phase naps on the night's calendar day.
    pub naps: u32,
    /// Total day-phase nap minutes on the night's calendar day.
    pub nap_minutes: f64,
}

/// Per-night averages of night-phase sleep stretches, sorted by night date.
///
/// A stretch belongs to the night bucket of its start time; stretches whose
/// midpoint falls in the day window (a late-evening cat-nap ending quickly)
/// still count toward the night they started in, matching how parents talk
/// about "last night".
pub fn night_averages(table: &EventTable) -> Vec<NightStats> {
    let mut buckets: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

    for record in table.of_kind(&EventKind::Sleep) {
        let (Some(mins), Some(night)) = (record.duration_minutes(), record.night_of()) else {
            continue;
        };
        let entry = buckets.entry(night).or_insert((0.0, 0));
        entry.0 += mins;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(night, (total, n))| NightStats {
            night,
            mean_minutes: total / n as f64,
            total_minutes: total,
            stretches: n,
        })
        .collect()
}

/// The `n` nights with the longest mean stretch, best first.
pub fn best_nights(table: &EventTable, n: usize) -> Vec<NightDayStats> {
    let mut nights = night_averages(table);
    nights.sort_by(|a, b| {
        b.mean_minutes
            .partial_cmp(&a.mean_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    nights.truncate(n);
    join_day_naps(table, nights)
}

/// The `n` nights with the shortest mean stretch, worst first.
pub fn worst_nights(table: &EventTable, n: usize) -> Vec<NightDayStats> {
    let mut nights = night_averages(table);
    nights.sort_by(|a, b| {
        a.mean_minutes
            .partial_cmp(&b.mean_minutes)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    nights.truncate(n);
    join_day_naps(table, nights)
}

/// Join each night with the day-phase naps logged on the same calendar day,
/// i.e. the naps that preceded that evening's bedtime.
fn join_day_naps(table: &EventTable, nights: Vec<NightStats>) -> Vec<NightDayStats> {
    let mut naps_by_date: BTreeMap<NaiveDate, (u32, f64)> = BTreeMap::new();

    for record in table.of_kind(&EventKind::Sleep) {
        let (Some(mins), Some(DayPhase::Day)) = (record.duration_minutes(), record.day_phase())
        else {
            continue;
        };
        let entry = naps_by_date.entry(record.start_date()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += mins;
    }

    nights
        .into_iter()
        .map(|night| {
            let (naps, nap_minutes) = naps_by_date
                .get(&night.night)
                .copied()
                .unwrap_or((0, 0.0));
            NightDayStats {
                night,
                naps,
                nap_minutes,
            }
        })
        .collect()
}

// ── Overview ──────────────────────────────────────────────────────────────────

/// Headline statistics across the whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewStats {
    pub days: u32,
    pub avg_sleep_hours_per_day: f64,
    pub avg_sleeps_per_day: f64,
    pub night_sleep_pct: f64,
    pub avg_feeds_per_day: f64,
}

/// Compute headline averages over every day that has sleep records.
///
/// Day counts for the sleep and feed averages are taken over the days on
/// which that kind appears, so a day without logged feeds does not dilute
/// the feeds average.
pub fn overview(table: &EventTable) -> OverviewStats {
    let daily = aggregate_daily(table);

    let sleep_days: Vec<&DailyMetric> = daily
        .iter()
        .filter(|m| m.kind == EventKind::Sleep)
        .collect();
    let feed_days: Vec<&DailyMetric> = daily
        .iter()
        .filter(|m| m.kind == EventKind::Feed)
        .collect();

    let total_sleep_minutes: f64 = sleep_days.iter().map(|m| m.total_minutes).sum();
    let total_sleeps: u32 = sleep_days.iter().map(|m| m.count).sum();
    let total_feeds: u32 = feed_days.iter().map(|m| m.count).sum();

    let night_minutes: f64 = table
        .of_kind(&EventKind::Sleep)
        .filter(|r| r.day_phase() == Some(DayPhase::Night))
        .filter_map(|r| r.duration_minutes())
        .sum();

    let sleep_day_count = sleep_days.len() as f64;
    let feed_day_count = feed_days.len() as f64;

    OverviewStats {
        days: sleep_days.len() as u32,
        avg_sleep_hours_per_day: if sleep_days.is_empty() {
            0.0
        } else {
            total_sleep_minutes / 60.0 / sleep_day_count
        },
        avg_sleeps_per_day: if sleep_days.is_empty() {
            0.0
        } else {
            total_sleeps as f64 / sleep_day_count
        },
        night_sleep_pct: percentage(night_minutes, total_sleep_minutes, 1),
        avg_feeds_per_day: if feed_days.is_empty() {
            0.0
        } else {
            total_feeds as f64 / feed_day_count
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
