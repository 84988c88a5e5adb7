use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ───────────────────────────────────────────────────────

/// Ensure the standard `~/.babystat/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.babystat/`
/// - `~/.babystat/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".babystat");
    std::fs::create_dir_all(&app_dir)?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ─────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Export discovery ──────────────────────────────────────────────────────────

/// Attempt to locate a CSV export on the local system.
///
/// Checks the following locations in order and returns the first hit:
/// 1. The first `.csv` file under `./data/`.
/// 2. `~/.babystat/export.csv`.
///
/// Returns `None` when no export is found anywhere.
pub fn discover_export_file() -> Option<PathBuf> {
    let local = babystat_data::loader::find_export_files(std::path::Path::new("data"));
    if let Some(first) = local.into_iter().next() {
        return Some(first);
    }

    let home = dirs::home_dir()?;
    let fallback = home.join(".babystat").join("export.csv");
    fallback.exists().then_some(fallback)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
