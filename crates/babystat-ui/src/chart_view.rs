//! Chart artifact rendering.
//!
//! Line charts plot each series against a shared day axis; bar charts render
//! one bar per day.  Both fall back to the "no data" placeholder when the
//! artifact carries no points.

use babystat_core::formatting::format_number;
use babystat_data::report::ChartArtifact;
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Bar, BarChart, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::table_view::render_no_data;
use crate::themes::Theme;

/// Render a line chart artifact into `area`.
pub fn render_line_chart(frame: &mut Frame, area: Rect, artifact: &ChartArtifact, theme: &Theme) {
    let Some(origin) = earliest_date(artifact) else {
        render_no_data(frame, area, &artifact.title, theme);
        return;
    };

    // Map dates to day offsets from the earliest point so all series share
    // one x axis.
    let series_data: Vec<Vec<(f64, f64)>> = artifact
        .series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|(date, value)| (day_offset(origin, *date), *value))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = artifact
        .series
        .iter()
        .zip(series_data.iter())
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.series_style(i))
                .data(data)
        })
        .collect();

    let max_x = series_data
        .iter()
        .flatten()
        .map(|(x, _)| *x)
        .fold(0.0_f64, f64::max);
    let max_y = series_data
        .iter()
        .flatten()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max);
    let y_top = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };

    let x_labels = vec![
        Span::styled(origin.format("%m-%d").to_string(), theme.chart_labels),
        Span::styled(
            (origin + chrono::Duration::days(max_x as i64))
                .format("%m-%d")
                .to_string(),
            theme.chart_labels,
        ),
    ];
    let y_labels = vec![
        Span::styled("0".to_string(), theme.chart_labels),
        Span::styled(format_number(y_top, 1), theme.chart_labels),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", artifact.title)),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, max_x.max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(artifact.y_label.clone(), theme.chart_labels))
                .style(theme.chart_axis)
                .bounds([0.0, y_top])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Render a bar chart artifact into `area`.
///
/// Bar charts carry a single series; one bar per day, labelled `MM-DD`.
pub fn render_bar_chart(frame: &mut Frame, area: Rect, artifact: &ChartArtifact, theme: &Theme) {
    let Some(series) = artifact.series.first().filter(|s| !s.points.is_empty()) else {
        render_no_data(frame, area, &artifact.title, theme);
        return;
    };

    let bars: Vec<Bar> = series
        .points
        .iter()
        .map(|(date, value)| {
            Bar::default()
                .label(date.format("%m-%d").to_string())
                .value(value.round() as u64)
                .style(theme.bar_fill)
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", artifact.title)),
        )
        .data(ratatui::widgets::BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1);

    frame.render_widget(chart, area);
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn earliest_date(artifact: &ChartArtifact) -> Option<NaiveDate> {
    artifact
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|(date, _)| *date))
        .min()
}

fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
