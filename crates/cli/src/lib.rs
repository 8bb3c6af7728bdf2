//! `worktrack` command-line shell over the store and analytics crates.

pub mod cli;
pub mod commands;

use std::io::Write;

use anyhow::Context;
use worktrack_store::{StoreConfig, WorkStore};

pub use cli::{Cli, Command};

/// Resolve the database location, run one command and close the store.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let config = match cli.db {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::from_env().context("failed to resolve database location")?,
    };
    tracing::debug!(location = ?config.location, "using database");

    let mut store = WorkStore::open(config)?;
    let result = commands::execute(cli.command, &mut store, out);
    let closed = store.close();
    result?;
    closed?;
    Ok(())
}
