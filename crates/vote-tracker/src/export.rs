//! `--view json`: the loaded table reduced to one project's series.

use chrono::Utc;
use serde::Serialize;

use tracker_core::models::{LabelOrder, ProjectSeries};
use tracker_data::aggregator::{LoadOutcome, SkippedSource};
use tracker_data::selector;

#[derive(Debug, Serialize)]
pub struct Export<'a> {
    /// RFC 3339 timestamp of the export.
    pub generated_at: String,
    pub data_dir: String,
    pub projects: Vec<String>,
    pub series: Option<ProjectSeries>,
    pub skipped: &'a [SkippedSource],
}

/// Build the export for `requested`, or for the first project when the
/// request is absent or not in the table.
pub fn build_export<'a>(
    data_dir: &str,
    outcome: &'a LoadOutcome,
    requested: Option<&str>,
    order: LabelOrder,
) -> Export<'a> {
    let projects = selector::distinct_project_names(&outcome.table);
    let chosen = requested
        .map(str::trim)
        .filter(|name| projects.iter().any(|p| p == name))
        .or_else(|| projects.first().map(String::as_str));
    let series = chosen.map(|name| selector::project_series(&outcome.table, name, order));

    Export {
        generated_at: Utc::now().to_rfc3339(),
        data_dir: data_dir.to_string(),
        projects,
        series,
        skipped: &outcome.skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::models::{SnapshotRecord, SnapshotTable};

    fn record(project: &str, label: &str, points: u64) -> SnapshotRecord {
        SnapshotRecord {
            project: project.to_string(),
            points,
            average: 4.5,
            rank: None,
            snapshot_label: label.to_string(),
            source: label.to_string(),
        }
    }

    fn outcome() -> LoadOutcome {
        LoadOutcome {
            table: SnapshotTable::new(vec![
                record("Foo", "2", 20),
                record("Bar", "1", 5),
                record("Foo", "1", 10),
            ]),
            sources_found: 2,
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_export_requested_project() {
        let loaded = outcome();
        let export = build_export("gamejam", &loaded, Some("Foo"), LabelOrder::Lexical);
        assert_eq!(export.projects, vec!["Bar", "Foo"]);
        let series = export.series.expect("series");
        assert_eq!(series.project, "Foo");
        let points: Vec<u64> = series.points.iter().map(|p| p.points).collect();
        assert_eq!(points, vec![10, 20]);
    }

    #[test]
    fn test_export_falls_back_to_first_project() {
        let loaded = outcome();
        let export = build_export("gamejam", &loaded, Some("Missing"), LabelOrder::Lexical);
        assert_eq!(export.series.expect("series").project, "Bar");
    }

    #[test]
    fn test_export_empty_table_has_null_series() {
        let loaded = LoadOutcome::default();
        let export = build_export("gamejam", &loaded, None, LabelOrder::Lexical);
        let json = serde_json::to_value(&export).expect("serialise");
        assert!(json["series"].is_null());
        assert_eq!(json["projects"], serde_json::json!([]));
        assert_eq!(json["data_dir"], "gamejam");
        assert!(json["generated_at"].as_str().is_some());
    }

    #[test]
    fn test_export_lists_skipped_sources() {
        let mut loaded = outcome();
        loaded.skipped.push(SkippedSource {
            identity: "3".to_string(),
            reason: "Invalid points value: \"x\"".to_string(),
        });
        let export = build_export("gamejam", &loaded, None, LabelOrder::Lexical);
        let json = serde_json::to_value(&export).expect("serialise");
        assert_eq!(json["skipped"][0]["identity"], "3");
    }
}
