#![warn(clippy::all, rust_2018_idioms)]

use std::process::ExitCode;

use clap::Parser as _;
use libris_cli::{cli::Cli, configuration::get_configuration};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match get_configuration() {
        Ok(config) => libris_cli::apply_overrides(&cli, config),
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = libris_cli::tracing::init(&cli, &config) {
        eprintln!("Failed to start tracing: {e}");
    }

    match libris_cli::run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
