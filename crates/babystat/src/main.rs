mod bootstrap;

use anyhow::{Context, Result};
use babystat_core::error::BabyStatError;
use babystat_core::settings::Settings;
use babystat_data::{loader, report};
use babystat_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("babystat v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Theme: {}, top-n: {}", settings.theme, settings.top_n);

    // Resolve the export file: explicit argument (or remembered last-used
    // path) first, then local discovery.
    let export_path = match settings.file.clone().filter(|p| p.exists()) {
        Some(path) => path,
        None => bootstrap::discover_export_file()
            .ok_or_else(|| BabyStatError::NoExportFiles(std::path::PathBuf::from("data")))
            .context(
                "Pass an export path, or place a CSV under ./data/ or at ~/.babystat/export.csv",
            )?,
    };

    tracing::info!("Loading export from {}", export_path.display());
    let mut table = loader::load_table(&export_path)?;

    if !settings.keep_partial_days {
        let before = table.len();
        table = table.trim_partial_days();
        tracing::debug!(
            "Trimmed partial boundary days: {} -> {} records",
            before,
            table.len()
        );
    }

    if let Some(start) = settings.start_date {
        table = table.filter_from(start);
        tracing::debug!("Filtered to records from {}: {} remain", start, table.len());
    }

    let artifacts = report::build_report(&table, settings.top_n as usize)?;
    tracing::info!("Report ready: {} pages", artifacts.len());

    App::new(&settings.theme, artifacts).run()?;

    Ok(())
}
