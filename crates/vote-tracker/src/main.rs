mod bootstrap;
mod export;

use anyhow::{Context, Result};
use tracker_core::settings::Settings;
use tracker_data::aggregator::load_table;
use tracker_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;

    // The TUI owns the terminal, so its logs go to a file unless one is given.
    let log_file = settings
        .log_file
        .clone()
        .or_else(|| (settings.view == "chart").then(bootstrap::default_log_file));
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Vote Tracker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, View: {}, Order: {}, Theme: {}",
        settings.data_dir.display(),
        settings.view,
        settings.order,
        settings.theme
    );

    let ctx = settings.context();
    let order = settings.label_order();
    let data_dir = ctx.data_dir.display().to_string();

    let outcome = load_table(&ctx)
        .with_context(|| format!("failed to load snapshots from {}", data_dir))?;
    if outcome.table.is_empty() {
        tracing::warn!("No voting data found in {}", data_dir);
    }

    match settings.view.as_str() {
        "json" => {
            let export =
                export::build_export(&data_dir, &outcome, settings.project.as_deref(), order);
            println!("{}", serde_json::to_string_pretty(&export)?);
        }

        "chart" => {
            let app = App::new(
                &settings.theme,
                order,
                data_dir,
                outcome,
                settings.project.as_deref(),
            );
            let selected = app.run(|| load_table(&ctx))?;
            tracing::info!("Exited with project {:?} selected", selected);
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
