//! Data pipeline for the babystat dashboard.
//!
//! The pipeline runs once per invocation, in three stages:
//!
//! 1. [`loader`] reads a tracker CSV export into an
//!    [`EventTable`](babystat_core::models::EventTable),
//! 2. [`transformer`] aggregates records into per-day metrics,
//! 3. [`report`] assembles the fixed, ordered list of chart and table
//!    artifacts the UI renders.

pub mod loader;
pub mod report;
pub mod transformer;
