//! Command-line interface for book-minder.
//!
//! This module provides CLI commands for identifying books from cover
//! photos and managing the book and user stores.

mod commands;

pub use commands::{Cli, Commands, run_command};
