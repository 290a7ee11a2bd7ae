//! CLI command implementations.

pub mod common;
pub mod compose;
pub mod output;
pub mod run;
pub mod schedule;
pub mod version;
