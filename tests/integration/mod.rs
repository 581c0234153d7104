//! Integration Tests Module
//!
//! End-to-end tests over SQLite snapshots and the compiled binary.

pub mod cli_smoke_test;
pub mod report_cache;
pub mod snapshot_report;
