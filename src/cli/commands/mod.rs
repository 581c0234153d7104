pub mod config;
pub mod report;
pub mod test_source;
