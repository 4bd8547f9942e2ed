//! Adapters between the pipeline and files: CSV packet replays and outcome
//! reports, and JSON directory snapshots.

pub mod csv;
pub mod json;
