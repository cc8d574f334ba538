//! Utilities for demos.
mod config;
mod export;
mod run;

pub use config::DemoConfig;
pub use export::{write_records, write_trace, EpisodeRow, TraceRow};
pub use run::{show_rollout, train};
