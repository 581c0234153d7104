//! End-to-end suites: snapshot databases, caching and the CLI surface

#[path = "common/mod.rs"]
mod common;

#[path = "integration/mod.rs"]
mod integration;
