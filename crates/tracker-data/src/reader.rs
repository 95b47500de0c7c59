//! Snapshot discovery and document sources.
//!
//! A [`SnapshotSource`] pairs an identity (the fallback label) with a way to
//! produce the document text. [`FileSource`] reads from disk;
//! [`MemorySource`] holds the text directly so the aggregation pipeline can
//! run without touching a filesystem.

use std::path::{Path, PathBuf};

use tracing::warn;
use tracker_core::{Result, TrackerError};

// ── SnapshotSource ────────────────────────────────────────────────────────────

/// One snapshot document waiting to be parsed.
pub trait SnapshotSource {
    /// Stable name of the snapshot, used as its label when the document
    /// carries no "last updated" line.
    fn identity(&self) -> &str;

    /// Produce the full document text.
    fn read(&self) -> Result<String>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    fn identity(&self) -> &str {
        (**self).identity()
    }

    fn read(&self) -> Result<String> {
        (**self).read()
    }
}

/// A snapshot file on disk, identified by its file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
    stem: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = file_stem(&path);
        Self { path, stem }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSource {
    fn identity(&self) -> &str {
        &self.stem
    }

    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|source| TrackerError::FileRead {
            path: self.path.clone(),
            source,
        })
    }
}

/// A snapshot held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySource {
    identity: String,
    text: String,
}

impl MemorySource {
    pub fn new(identity: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            text: text.into(),
        }
    }
}

impl SnapshotSource for MemorySource {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn read(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find snapshot files directly inside `data_dir` whose extension is
/// `extension`, sorted by file stem.
///
/// Subdirectories are not searched. A missing directory logs a warning and
/// yields no files.
pub fn find_snapshot_files(data_dir: &Path, extension: &str) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("Data path does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == extension)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    // Stem order, not full-path order: "10.txt" vs "1.txt" must compare as
    // "10" vs "1".
    files.sort_by_cached_key(|p| file_stem(p));
    files
}

/// Discover snapshot files and wrap each one as a [`FileSource`], in stem
/// order.
pub fn snapshot_sources(data_dir: &Path, extension: &str) -> Vec<FileSource> {
    find_snapshot_files(data_dir, extension)
        .into_iter()
        .map(FileSource::new)
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "x").unwrap();
        path
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_find_snapshot_files_filters_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "1.txt");
        touch(dir.path(), "2.txt");
        touch(dir.path(), "notes.md");

        let files = find_snapshot_files(dir.path(), "txt");
        assert_eq!(names(&files), vec!["1.txt", "2.txt"]);
    }

    #[test]
    fn test_find_snapshot_files_sorted_by_stem() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.txt");
        touch(dir.path(), "10.txt");
        touch(dir.path(), "a.txt");
        touch(dir.path(), "1.txt");

        let files = find_snapshot_files(dir.path(), "txt");
        assert_eq!(names(&files), vec!["1.txt", "10.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_find_snapshot_files_not_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir_all(&sub).unwrap();
        touch(dir.path(), "1.txt");
        touch(&sub, "old.txt");

        let files = find_snapshot_files(dir.path(), "txt");
        assert_eq!(names(&files), vec!["1.txt"]);
    }

    #[test]
    fn test_find_snapshot_files_nonexistent_path() {
        let files = find_snapshot_files(Path::new("/tmp/does-not-exist-vote-tracker-xyz"), "txt");
        assert!(files.is_empty());
    }

    #[test]
    fn test_file_source_identity_is_stem() {
        let source = FileSource::new("/data/gamejam/07.txt");
        assert_eq!(source.identity(), "07");
        assert_eq!(source.path(), Path::new("/data/gamejam/07.txt"));
    }

    #[test]
    fn test_file_source_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1.txt");
        std::fs::write(&path, "Проект: Foo\n").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.read().unwrap(), "Проект: Foo\n");
    }

    #[test]
    fn test_file_source_missing_file_is_file_read_error() {
        let source = FileSource::new("/tmp/does-not-exist-vote-tracker-xyz/1.txt");
        let err = source.read().unwrap_err();
        assert!(matches!(err, TrackerError::FileRead { .. }));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new("2", "text");
        assert_eq!(source.identity(), "2");
        assert_eq!(source.read().unwrap(), "text");
    }

    #[test]
    fn test_snapshot_sources_in_stem_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "2.txt");
        touch(dir.path(), "1.txt");

        let sources = snapshot_sources(dir.path(), "txt");
        let ids: Vec<&str> = sources.iter().map(|s| s.identity()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
