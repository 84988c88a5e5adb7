//! Report assembly.
//!
//! [`build_report`] turns an [`EventTable`] into the fixed, ordered list of
//! artifacts the dashboard pages through.  The list always has the same
//! length and order for a given table; series with no data points are
//! emitted anyway and rendered as an empty state.

use babystat_core::error::Result;
use babystat_core::formatting::{format_hours, format_minutes, format_number};
use babystat_core::models::EventTable;
use chrono::NaiveDate;
use tracing::debug;

use crate::transformer::{
    best_nights, check_date_range, feeds_per_day, growth_series, night_sleep_share, overview,
    sleep_hours_per_day, sleep_phase_averages, worst_nights, NightDayStats,
};

// ── Artifact types ────────────────────────────────────────────────────────────

/// How an artifact is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Line,
    Bar,
    Table,
}

/// One named series of daily values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// A chart with one or more series over a shared date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub title: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

/// A table with a header row and string cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TableArtifact {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One page of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Line(ChartArtifact),
    Bar(ChartArtifact),
    Table(TableArtifact),
}

impl Artifact {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Artifact::Line(_) => ArtifactKind::Line,
            Artifact::Bar(_) => ArtifactKind::Bar,
            Artifact::Table(_) => ArtifactKind::Table,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Artifact::Line(c) | Artifact::Bar(c) => &c.title,
            Artifact::Table(t) => &t.title,
        }
    }
}

// ── Report builder ────────────────────────────────────────────────────────────

/// Build the full dashboard report from a table.
///
/// Validates the table's date range, then emits exactly ten artifacts in a
/// fixed order.  Building the same table twice yields identical output.
pub fn build_report(table: &EventTable, top_n: usize) -> Result<Vec<Artifact>> {
    check_date_range(table)?;

    let artifacts = vec![
        overview_table(table),
        sleep_hours_chart(table),
        phase_averages_chart(table),
        night_share_chart(table),
        feeds_chart(table),
        growth_chart(table, GrowthAxis::Weight),
        growth_chart(table, GrowthAxis::Height),
        growth_chart(table, GrowthAxis::Head),
        nights_table(best_nights(table, top_n), "Best nights"),
        nights_table(worst_nights(table, top_n), "Worst nights"),
    ];

    debug!("Built report with {} artifacts", artifacts.len());
    Ok(artifacts)
}

// ── Individual artifacts ──────────────────────────────────────────────────────

fn overview_table(table: &EventTable) -> Artifact {
    let stats = overview(table);

    let rows = vec![
        vec![
            "Days with sleep records".to_string(),
            stats.days.to_string(),
        ],
        vec![
            "Avg sleep per day".to_string(),
            format_hours(stats.avg_sleep_hours_per_day * 60.0),
        ],
        vec![
            "Avg sleeps per day".to_string(),
            format_number(stats.avg_sleeps_per_day, 1),
        ],
        vec![
            "Night share of sleep".to_string(),
            format!("{}%", format_number(stats.night_sleep_pct, 1)),
        ],
        vec![
            "Avg feeds per day".to_string(),
            format_number(stats.avg_feeds_per_day, 1),
        ],
    ];

    Artifact::Table(TableArtifact {
        title: "Overview".to_string(),
        headers: vec!["Statistic".to_string(), "Value".to_string()],
        rows,
    })
}

fn sleep_hours_chart(table: &EventTable) -> Artifact {
    Artifact::Line(ChartArtifact {
        title: "Sleep per day".to_string(),
        y_label: "hours".to_string(),
        series: vec![Series {
            name: "Total sleep".to_string(),
            points: sleep_hours_per_day(table),
        }],
    })
}

fn phase_averages_chart(table: &EventTable) -> Artifact {
    let (day, night) = sleep_phase_averages(table);
    Artifact::Line(ChartArtifact {
        title: "Average sleep stretch".to_string(),
        y_label: "hours".to_string(),
        series: vec![
            Series {
                name: "Day".to_string(),
                points: day,
            },
            Series {
                name: "Night".to_string(),
                points: night,
            },
        ],
    })
}

fn night_share_chart(table: &EventTable) -> Artifact {
    Artifact::Line(ChartArtifact {
        title: "Night share of sleep".to_string(),
        y_label: "%".to_string(),
        series: vec![Series {
            name: "Night share".to_string(),
            points: night_sleep_share(table),
        }],
    })
}

fn feeds_chart(table: &EventTable) -> Artifact {
    Artifact::Bar(ChartArtifact {
        title: "Feeds per day".to_string(),
        y_label: "feeds".to_string(),
        series: vec![Series {
            name: "Feeds".to_string(),
            points: feeds_per_day(table),
        }],
    })
}

#[derive(Clone, Copy)]
enum GrowthAxis {
    Weight,
    Height,
    Head,
}

fn growth_chart(table: &EventTable, axis: GrowthAxis) -> Artifact {
    let samples = growth_series(table);

    let (title, y_label, points): (&str, &str, Vec<(NaiveDate, f64)>) = match axis {
        GrowthAxis::Weight => (
            "Weight",
            "kg",
            samples
                .iter()
                .filter_map(|s| s.weight_kg.map(|v| (s.date, v)))
                .collect(),
        ),
        GrowthAxis::Height => (
            "Height",
            "cm",
            samples
                .iter()
                .filter_map(|s| s.height_cm.map(|v| (s.date, v)))
                .collect(),
        ),
        GrowthAxis::Head => (
            "Head circumference",
            "cm",
            samples
                .iter()
                .filter_map(|s| s.head_cm.map(|v| (s.date, v)))
                .collect(),
        ),
    };

    Artifact::Line(ChartArtifact {
        title: title.to_string(),
        y_label: y_label.to_string(),
        series: vec![Series {
            name: title.to_string(),
            points,
        }],
    })
}

fn nights_table(nights: Vec<NightDayStats>, title: &str) -> Artifact {
    let rows = nights
        .into_iter()
        .map(|n| {
            vec![
                n.night.night.format("%Y-%m-%d").to_string(),
                format_minutes(n.night.mean_minutes),
                format_minutes(n.night.total_minutes),
                n.night.stretches.to_string(),
                n.naps.to_string(),
                format_minutes(n.nap_minutes),
            ]
        })
        .collect();

    Artifact::Table(TableArtifact {
        title: title.to_string(),
        headers: vec![
            "Night".to_string(),
            "Avg stretch".to_string(),
            "Total".to_string(),
            "Stretches".to_string(),
            "Naps that day".to_string(),
            "Nap time".to_string(),
        ],
        rows,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
