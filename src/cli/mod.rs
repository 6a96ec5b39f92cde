//! Command-line interface for liner-notes.
//!
//! This module provides one command per extractor plus snapshot cache and
//! config maintenance.

mod commands;

pub use commands::{Cli, Commands, run_command};
