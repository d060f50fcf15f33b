//! Book Minder - A library catalog backend.
//!
//! Identifies books from photos of their covers by combining a vision model's
//! reading of the cover with a public book catalog, and keeps a local catalog
//! of books and user accounts. Everything is driven through CLI commands.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod identification;
pub mod model;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("book_minder=info".parse()?))
        .init();

    cli::run_command(&args)
}
