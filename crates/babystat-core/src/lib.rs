//! Core domain types and shared utilities for the babystat dashboard.
//!
//! Holds the event model, error surface, CLI settings, and the formatting
//! and time helpers the data and UI crates build on.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
