use anyhow::{bail, Context as _};
use libris_shared::telemetry;

use crate::{cli::Cli, configuration::Configuration};

const APP_NAME: &str = "libris_cli";

/// Logs to a new file in the configured trace folder unless `--stdout` was
/// passed or the file cannot be created
pub fn init(cli: &Cli, config: &Configuration) -> anyhow::Result<()> {
    fn init_to_file(config: &Configuration) -> anyhow::Result<()> {
        let filename =
            telemetry::init_file_subscriber(&config.trace_dir, APP_NAME, &config.log_filter)
                .context("Failed to start tracing to file")?;
        eprintln!("Tracing started to file {filename:?}");
        Ok(())
    }

    if !cli.is_to_std_out {
        // Log to file
        match init_to_file(config) {
            Ok(_) => return Ok(()),
            Err(e) => {
                // Print error and fall though to logging to stderr
                eprintln!("Failed to start logging to file: {e}");
            }
        }
    }

    // stdout carries command output
    match tracing_subscriber::fmt()
        .with_env_filter(telemetry::env_filter_or(&config.log_filter))
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(_) => Ok(()),
        Err(e) => {
            bail!("Failed to start tracing. Error: {e}");
        }
    }
}
