//! Terminal UI layer for the voting tracker.
//!
//! Provides themes, the header and project picker components, the chart and
//! raw table views, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use tracker_core as core;
