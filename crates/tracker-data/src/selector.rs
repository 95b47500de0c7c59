//! Per-project series selection.
//!
//! Ordering is by the snapshot label as a plain string. `"9:05"` therefore
//! sorts after `"10:00"`; this matches how historical data has always been
//! displayed and is kept as the default. [`LabelOrder::Chronological`] is an
//! opt-in alternative for corpora with unpadded time labels.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveTime;
use tracker_core::models::{
    LabelOrder, ProjectSeries, SeriesPoint, SnapshotRecord, SnapshotTable,
};

/// All records for `project_name`, ordered by ascending lexical label.
///
/// The query is trimmed before the exact comparison. Records sharing a
/// label keep their table order.
pub fn select(table: &SnapshotTable, project_name: &str) -> Vec<SnapshotRecord> {
    select_ordered(table, project_name, LabelOrder::Lexical)
}

/// Like [`select`], with an explicit label ordering.
pub fn select_ordered(
    table: &SnapshotTable,
    project_name: &str,
    order: LabelOrder,
) -> Vec<SnapshotRecord> {
    let wanted = project_name.trim();
    let mut records: Vec<SnapshotRecord> = table
        .iter()
        .filter(|r| r.project == wanted)
        .cloned()
        .collect();

    match order {
        LabelOrder::Lexical => records.sort_by(|a, b| a.snapshot_label.cmp(&b.snapshot_label)),
        LabelOrder::Chronological => {
            records.sort_by(|a, b| compare_chronological(&a.snapshot_label, &b.snapshot_label))
        }
    }

    records
}

/// Every distinct project name in the table, sorted.
pub fn distinct_project_names(table: &SnapshotTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.project.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Reshape selected records into a chartable series.
pub fn to_series(project_name: &str, records: &[SnapshotRecord]) -> ProjectSeries {
    ProjectSeries {
        project: project_name.trim().to_string(),
        points: records.iter().map(SeriesPoint::from).collect(),
    }
}

/// Select `project_name` and reshape it in one step.
pub fn project_series(
    table: &SnapshotTable,
    project_name: &str,
    order: LabelOrder,
) -> ProjectSeries {
    to_series(project_name, &select_ordered(table, project_name, order))
}

/// Parse a time-of-day label such as `"10:19"` or `"9:05"`.
pub fn parse_time_label(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(label, "%H:%M:%S"))
        .ok()
}

/// Opaque labels first (lexically), then time labels by time of day.
fn compare_chronological(a: &str, b: &str) -> Ordering {
    match (parse_time_label(a), parse_time_label(b)) {
        (Some(ta), Some(tb)) => ta.cmp(&tb).then_with(|| a.cmp(b)),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
