//! Command line front-end for the library backend. Each invocation runs one
//! command and the session is kept on disk between invocations.

#![warn(unused_crate_dependencies)]


pub mod cli;
pub mod commands;
pub mod configuration;
pub mod runtime;
pub mod tracing;

use anyhow::Context as _;
use libris_client_core::{storage::FileStorage, Client, SessionStore};

use crate::{cli::Cli, configuration::Configuration};

/// Applies the command line overrides on top of the loaded configuration
pub fn apply_overrides(cli: &Cli, mut config: Configuration) -> Configuration {
    if let Some(server) = &cli.server {
        config.server_address = server.clone();
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = dir.clone();
    }
    config
}

/// Restores the session from `config.storage_dir` and runs the command
pub fn run(cli: Cli, config: &Configuration) -> anyhow::Result<()> {
    let storage = FileStorage::open(&config.storage_dir)?;
    let session = SessionStore::load(Box::new(storage)).context("failed to restore session")?;
    let client = Client::new(config.server_address.clone(), session);
    ::tracing::info!(server_address = config.server_address, "client ready");

    let rt = runtime::create_runtime()?;
    rt.block_on(commands::run(cli.command, &client))
}
