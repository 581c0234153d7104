//! Unit Tests Module
//!
//! Paged fetching, retry classification and per-dimension isolation,
//! driven through scripted in-memory sources.

pub mod assembler_isolation;
pub mod fetch_pagination;
pub mod fetch_retry;
