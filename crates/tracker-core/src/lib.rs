//! Shared types for the vote tracker.
//!
//! Holds the snapshot data model, the error type, CLI settings with their
//! persisted last-used values, and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{Result, TrackerError};
