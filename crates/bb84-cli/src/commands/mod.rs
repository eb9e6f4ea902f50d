//! CLI command implementations.

pub mod common;
pub mod run;
pub mod stats;
pub mod version;
