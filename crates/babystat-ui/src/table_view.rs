//! Table artifact rendering.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with a styled header row
//! and alternating row colours.

use babystat_data::report::TableArtifact;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::themes::Theme;

/// Render a table artifact into `area`.
///
/// Falls back to the "no data" placeholder when the artifact has no rows.
pub fn render_table_artifact(
    frame: &mut Frame,
    area: Rect,
    artifact: &TableArtifact,
    theme: &Theme,
) {
    if artifact.rows.is_empty() {
        render_no_data(frame, area, &artifact.title, theme);
        return;
    }

    let header_cells = artifact
        .headers
        .iter()
        .map(|h| Cell::from(h.as_str()).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = artifact
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(row.iter().map(|cell| Cell::from(cell.as_str()))).style(style)
        })
        .collect();

    // Evenly sized columns; the terminal splits the remainder.
    let column_count = artifact.headers.len().max(1);
    let widths = vec![Constraint::Ratio(1, column_count as u32); column_count];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", artifact.title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a "no data" placeholder for an artifact with nothing to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No records for this view", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "The export has no data in this category.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
