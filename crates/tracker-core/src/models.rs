use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One project's standing as reported by a single snapshot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Project name, trimmed of surrounding whitespace.
    pub project: String,
    /// Cumulative point total at the time of the snapshot.
    pub points: u64,
    /// Mean per-vote score at the time of the snapshot.
    pub average: f64,
    /// Standing position (1 = best). Absent in the early report format.
    #[serde(default)]
    pub rank: Option<u32>,
    /// Opaque ordering/display key for the snapshot.
    pub snapshot_label: String,
    /// Identity of the document the record was parsed from.
    #[serde(default)]
    pub source: String,
}

/// Every record from every snapshot, in source processing order.
///
/// The table is a derived view: it is rebuilt from the input files on each
/// load and never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotTable {
    records: Vec<SnapshotRecord>,
}

impl SnapshotTable {
    pub fn new(records: Vec<SnapshotRecord>) -> Self {
        Self { records }
    }

    /// `true` when no snapshot produced a record. Callers treat this as the
    /// "no data" state rather than an error.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[SnapshotRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SnapshotRecord> {
        self.records.iter()
    }

    /// Append all records from one snapshot, keeping their order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = SnapshotRecord>) {
        self.records.extend(records);
    }
}

impl<'a> IntoIterator for &'a SnapshotTable {
    type Item = &'a SnapshotRecord;
    type IntoIter = std::slice::Iter<'a, SnapshotRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A single observation of a project, shaped for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub points: u64,
    pub average: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl From<&SnapshotRecord> for SeriesPoint {
    fn from(record: &SnapshotRecord) -> Self {
        Self {
            label: record.snapshot_label.clone(),
            points: record.points,
            average: record.average,
            rank: record.rank,
        }
    }
}

/// The time-ordered observations of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSeries {
    pub project: String,
    pub points: Vec<SeriesPoint>,
}

impl ProjectSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` when at least one observation carries a rank.
    pub fn has_rank(&self) -> bool {
        self.points.iter().any(|p| p.rank.is_some())
    }
}

/// How snapshot labels are ordered along the time axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrder {
    /// Plain ascending string comparison of labels.
    #[default]
    Lexical,
    /// `HH:MM` labels by time of day; unparseable labels first, lexically.
    Chronological,
}

impl LabelOrder {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lexical" => Some(Self::Lexical),
            "chronological" => Some(Self::Chronological),
            _ => None,
        }
    }
}

/// What the loader does when a snapshot cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Abort the whole load with the first error.
    #[default]
    FailFast,
    /// Skip the offending snapshot and record a warning.
    Skip,
}

/// Everything the loader needs to know about where snapshots live.
///
/// Passed explicitly into the loading functions so tests can point them at
/// a temporary directory or bypass the filesystem altogether.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerContext {
    /// Directory scanned (non-recursively) for snapshot files.
    pub data_dir: PathBuf,
    /// File extension of snapshot files, without the leading dot.
    pub extension: String,
    pub read_policy: ReadPolicy,
}

impl TrackerContext {
    pub const DEFAULT_DATA_DIR: &'static str = "gamejam";
    pub const DEFAULT_EXTENSION: &'static str = "txt";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: Self::DEFAULT_EXTENSION.to_string(),
            read_policy: ReadPolicy::FailFast,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn with_read_policy(mut self, policy: ReadPolicy) -> Self {
        self.read_policy = policy;
        self
    }
}

impl Default for TrackerContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(project: &str, label: &str, rank: Option<u32>) -> SnapshotRecord {
        SnapshotRecord {
            project: project.to_string(),
            points: 10,
            average: 4.5,
            rank,
            snapshot_label: label.to_string(),
            source: "1".to_string(),
        }
    }

    #[test]
    fn test_table_empty_by_default() {
        let table = SnapshotTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_table_extend_preserves_order() {
        let mut table = SnapshotTable::default();
        table.extend(vec![record("B", "1", None), record("A", "1", None)]);
        table.extend(vec![record("C", "2", None)]);
        let names: Vec<&str> = table.iter().map(|r| r.project.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_series_point_from_record() {
        let point = SeriesPoint::from(&record("Foo", "10:00", Some(2)));
        assert_eq!(point.label, "10:00");
        assert_eq!(point.points, 10);
        assert_eq!(point.rank, Some(2));
    }

    #[test]
    fn test_series_has_rank() {
        let mut series = ProjectSeries {
            project: "Foo".to_string(),
            points: vec![SeriesPoint::from(&record("Foo", "1", None))],
        };
        assert!(!series.has_rank());
        series.points.push(SeriesPoint::from(&record("Foo", "2", Some(1))));
        assert!(series.has_rank());
    }

    #[test]
    fn test_series_point_serialization_omits_missing_rank() {
        let point = SeriesPoint::from(&record("Foo", "1", None));
        let json = serde_json::to_value(&point).unwrap();
        assert!(json.get("rank").is_none());
        assert_eq!(json["label"], "1");
    }

    #[test]
    fn test_label_order_from_name() {
        assert_eq!(LabelOrder::from_name("lexical"), Some(LabelOrder::Lexical));
        assert_eq!(
            LabelOrder::from_name("Chronological"),
            Some(LabelOrder::Chronological)
        );
        assert_eq!(LabelOrder::from_name("random"), None);
        assert_eq!(LabelOrder::default(), LabelOrder::Lexical);
    }

    #[test]
    fn test_context_defaults() {
        let ctx = TrackerContext::default();
        assert_eq!(ctx.data_dir, PathBuf::from("gamejam"));
        assert_eq!(ctx.extension, "txt");
        assert_eq!(ctx.read_policy, ReadPolicy::FailFast);
    }

    #[test]
    fn test_context_extension_strips_dot() {
        let ctx = TrackerContext::new("/data").with_extension(".log");
        assert_eq!(ctx.extension, "log");
    }
}
