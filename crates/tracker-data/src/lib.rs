//! Snapshot ingestion for the vote tracker.
//!
//! Parses voting report documents, aggregates every snapshot in a data
//! directory into one table, and selects per-project series from it.

pub mod aggregator;
pub mod parser;
pub mod reader;
pub mod selector;

pub use tracker_core as core;
