//! Terminal dashboard rendering for babystat.
//!
//! [`app::App`] owns the loaded report and pages through its artifacts;
//! [`chart_view`] and [`table_view`] render the individual artifact kinds.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;
