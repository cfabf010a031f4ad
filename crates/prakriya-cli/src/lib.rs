//! Command-line driver components for the prakriya engine.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
