use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the vote tracker.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A snapshot file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A project block field is empty or could not be converted.
    #[error("Invalid {field} value: {value:?}")]
    Format { field: &'static str, value: String },
}

impl TrackerError {
    /// Build a [`TrackerError::Format`] for `field` holding the raw `value`.
    pub fn format(field: &'static str, value: impl Into<String>) -> Self {
        Self::Format {
            field,
            value: value.into(),
        }
    }
}

/// Convenience alias used throughout the tracker crates.
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TrackerError::FileRead {
            path: PathBuf::from("/gamejam/1.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/gamejam/1.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_format() {
        let err = TrackerError::format("average", "4.5.1");
        assert_eq!(err.to_string(), "Invalid average value: \"4.5.1\"");
    }
}
