//! Connecta Influencer Analysis Statistics
//!

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod source;
pub mod types;
pub mod utils;
