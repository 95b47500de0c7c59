//! Multi-snapshot aggregation into one [`SnapshotTable`].
//!
//! Sources are processed strictly in the order given; the caller is
//! responsible for sorting them (see [`crate::reader::snapshot_sources`]).
//! Records are concatenated without deduplication, so the same project and
//! label can appear twice when two files overlap.

use serde::Serialize;
use tracing::{debug, warn};
use tracker_core::models::{ReadPolicy, SnapshotRecord, SnapshotTable, TrackerContext};
use tracker_core::Result;

use crate::parser;
use crate::reader::{snapshot_sources, SnapshotSource};

// ── Public types ──────────────────────────────────────────────────────────────

/// A snapshot left out of a lenient aggregation, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub identity: String,
    pub reason: String,
}

/// The result of loading a data directory.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub table: SnapshotTable,
    /// Number of snapshot sources that were discovered.
    pub sources_found: usize,
    /// Sources skipped under [`ReadPolicy::Skip`]; always empty otherwise.
    pub skipped: Vec<SkippedSource>,
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// Parse every source in order and concatenate the records.
///
/// Zero sources, or sources without any project block, give an empty table.
/// The first read or format error aborts the aggregation.
pub fn aggregate<S: SnapshotSource>(sources: &[S]) -> Result<SnapshotTable> {
    let mut table = SnapshotTable::default();

    for source in sources {
        let records = parse_source(source)?;
        debug!("Snapshot {}: {} records", source.identity(), records.len());
        table.extend(records);
    }

    Ok(table)
}

/// Like [`aggregate`], but a source that fails to read or parse is skipped
/// and reported instead of aborting the whole run.
pub fn aggregate_lenient<S: SnapshotSource>(
    sources: &[S],
) -> (SnapshotTable, Vec<SkippedSource>) {
    let mut table = SnapshotTable::default();
    let mut skipped = Vec::new();

    for source in sources {
        match parse_source(source) {
            Ok(records) => {
                debug!("Snapshot {}: {} records", source.identity(), records.len());
                table.extend(records);
            }
            Err(e) => {
                warn!("Skipping snapshot {}: {}", source.identity(), e);
                skipped.push(SkippedSource {
                    identity: source.identity().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (table, skipped)
}

/// Discover the snapshot files described by `ctx` and aggregate them
/// according to its read policy.
pub fn load_table(ctx: &TrackerContext) -> Result<LoadOutcome> {
    let sources = snapshot_sources(&ctx.data_dir, &ctx.extension);
    if sources.is_empty() {
        warn!(
            "No .{} snapshot files found in {}",
            ctx.extension,
            ctx.data_dir.display()
        );
    }

    let (table, skipped) = match ctx.read_policy {
        ReadPolicy::FailFast => (aggregate(&sources)?, Vec::new()),
        ReadPolicy::Skip => aggregate_lenient(&sources),
    };

    debug!(
        "Loaded {} records from {} snapshot files ({} skipped)",
        table.len(),
        sources.len(),
        skipped.len()
    );

    Ok(LoadOutcome {
        table,
        sources_found: sources.len(),
        skipped,
    })
}

fn parse_source<S: SnapshotSource>(source: &S) -> Result<Vec<SnapshotRecord>> {
    let text = source.read()?;
    parser::parse(&text, source.identity())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
