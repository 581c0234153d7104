//! Shared helpers for analysis and reporting

pub mod math;
pub mod time;
