//! Application state and TUI event loop.
//!
//! [`App`] owns the theme and the report artifacts and pages through them.
//! The dashboard is static once loaded, so the loop only handles keyboard
//! navigation.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use babystat_data::report::Artifact;

use crate::chart_view;
use crate::components::header::Header;
use crate::table_view;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Report artifacts, one per page.
    pub artifacts: Vec<Artifact>,
    /// 0-based index of the page currently shown.
    pub page: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application from a theme name and a built report.
    pub fn new(theme_name: &str, artifacts: Vec<Artifact>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            artifacts,
            page: 0,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without spinning.  Exits on `q`, `Q`, `Esc`, or `Ctrl+C`;
    /// `←`/`→`, `h`/`l`, and `Tab` page through the artifacts.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            self.quit()
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit(),
                        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.next_page(),
                        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.prev_page(),
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Ask the event loop to exit after the current iteration.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Advance to the next page, wrapping at the end.
    pub fn next_page(&mut self) {
        if !self.artifacts.is_empty() {
            self.page = (self.page + 1) % self.artifacts.len();
        }
    }

    /// Go back one page, wrapping at the start.
    pub fn prev_page(&mut self) {
        if !self.artifacts.is_empty() {
            self.page = (self.page + self.artifacts.len() - 1) % self.artifacts.len();
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current page into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let Some(artifact) = self.artifacts.get(self.page) else {
            table_view::render_no_data(frame, chunks[1], "Dashboard", &self.theme);
            return;
        };

        let header = Header::new(
            artifact.title(),
            self.page + 1,
            self.artifacts.len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        match artifact {
            Artifact::Line(chart) => {
                chart_view::render_line_chart(frame, chunks[1], chart, &self.theme)
            }
            Artifact::Bar(chart) => {
                chart_view::render_bar_chart(frame, chunks[1], chart, &self.theme)
            }
            Artifact::Table(table) => {
                table_view::render_table_artifact(frame, chunks[1], table, &self.theme)
            }
        }

        let footer = Line::from(vec![
            Span::styled("←/→", self.theme.value),
            Span::styled(" page  ", self.theme.dim),
            Span::styled("q", self.theme.value),
            Span::styled(" quit", self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[2]);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use babystat_data::report::{ChartArtifact, Series, TableArtifact};
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_artifacts() -> Vec<Artifact> {
        vec![
            Artifact::Table(TableArtifact {
                title: "Overview".to_string(),
                headers: vec!["Statistic".to_string(), "Value".to_string()],
                rows: vec![vec!["Avg sleep per day".to_string(), "12.5h".to_string()]],
            }),
            Artifact::Line(ChartArtifact {
                title: "Sleep per day".to_string(),
                y_label: "hours".to_string(),
                series: vec![Series {
                    name: "Total sleep".to_string(),
                    points: vec![(date("2024-01-15"), 12.5), (date("2024-01-16"), 11.0)],
                }],
            }),
            Artifact::Bar(ChartArtifact {
                title: "Feeds per day".to_string(),
                y_label: "feeds".to_string(),
                series: vec![Series {
                    name: "Feeds".to_string(),
                    points: vec![(date("2024-01-15"), 8.0)],
                }],
            }),
        ]
    }

    // ── Construction ─────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark", make_artifacts());
        assert_eq!(app.page, 0);
        assert!(!app.should_quit);
        assert_eq!(app.artifacts.len(), 3);
    }

    #[test]
    fn test_app_creation_unknown_theme_falls_back() {
        // Should not panic for unknown theme names.
        let app = App::new("neon", make_artifacts());
        assert_eq!(app.page, 0);
    }

    #[test]
    fn test_quit_sets_flag() {
        let mut app = App::new("dark", make_artifacts());
        assert!(!app.should_quit);
        app.quit();
        assert!(app.should_quit);
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    #[test]
    fn test_next_page_advances_and_wraps() {
        let mut app = App::new("dark", make_artifacts());
        app.next_page();
        assert_eq!(app.page, 1);
        app.next_page();
        assert_eq!(app.page, 2);
        app.next_page();
        assert_eq!(app.page, 0, "must wrap back to the first page");
    }

    #[test]
    fn test_prev_page_wraps_backwards() {
        let mut app = App::new("dark", make_artifacts());
        app.prev_page();
        assert_eq!(app.page, 2, "must wrap to the last page");
        app.prev_page();
        assert_eq!(app.page, 1);
    }

    #[test]
    fn test_navigation_with_no_artifacts() {
        let mut app = App::new("dark", vec![]);
        app.next_page();
        app.prev_page();
        assert_eq!(app.page, 0);
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    #[test]
    fn test_render_each_page_does_not_panic() {
        let mut app = App::new("dark", make_artifacts());
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        for _ in 0..app.artifacts.len() {
            terminal.draw(|frame| app.render(frame)).unwrap();
            app.next_page();
        }
    }

    #[test]
    fn test_render_shows_page_counter() {
        let app = App::new("dark", make_artifacts());
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("page 1/3"));
        assert!(rendered.contains("Overview"));
    }

    #[test]
    fn test_render_empty_report_shows_placeholder() {
        let app = App::new("dark", vec![]);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|frame| app.render(frame)).unwrap();

        let rendered = format!("{:?}", terminal.backend().buffer());
        assert!(rendered.contains("No records"));
    }
}
