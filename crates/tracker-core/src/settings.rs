use clap::Parser;
use std::path::PathBuf;

use crate::models::{LabelOrder, ReadPolicy, TrackerContext};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Chart game-jam voting snapshots per project
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vote-tracker",
    about = "Chart game-jam voting snapshots per project",
    version
)]
pub struct Settings {
    /// Directory containing the snapshot files
    #[arg(long, env = "VOTE_TRACKER_DATA_DIR", default_value = TrackerContext::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Extension of snapshot files
    #[arg(long, default_value = TrackerContext::DEFAULT_EXTENSION)]
    pub extension: String,

    /// Project to select on startup
    #[arg(long)]
    pub project: Option<String>,

    /// Output mode
    #[arg(long, default_value = "chart", value_parser = ["chart", "json"])]
    pub view: String,

    /// How snapshot labels are ordered on the time axis
    #[arg(long, default_value = "lexical", value_parser = ["lexical", "chronological"])]
    pub order: String,

    /// Skip snapshots that cannot be read or parsed instead of aborting
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Parse an explicit argument list and apply `--debug`.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::apply_debug(Settings::parse_from(args))
    }

    /// The loader context described by these settings.
    pub fn context(&self) -> TrackerContext {
        let policy = if self.skip_unreadable {
            ReadPolicy::Skip
        } else {
            ReadPolicy::FailFast
        };
        TrackerContext::new(self.data_dir.clone())
            .with_extension(self.extension.clone())
            .with_read_policy(policy)
    }

    pub fn label_order(&self) -> LabelOrder {
        LabelOrder::from_name(&self.order).unwrap_or_default()
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
