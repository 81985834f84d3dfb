//! Library components of the `survey-qc` command-line tool.

pub mod config;
pub mod deployment;
pub mod logging;
