//! Tracing setup shared by the CLI and the integration tests
//!
//! Output is bunyan formatted JSON. `RUST_LOG` takes precedence over the
//! filter passed in by the caller.

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// `RUST_LOG` if set and valid, otherwise `fallback_directives`
///
/// Directive syntax: <https://docs.rs/tracing-subscriber/0.3/tracing_subscriber/filter/struct.EnvFilter.html#directives>
pub fn env_filter_or<S: AsRef<str>>(fallback_directives: S) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_directives))
}

/// Bunyan subscriber named `name` writing to `sink`
pub fn get_subscriber<Sink, S>(
    name: String,
    fallback_directives: S,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    S: AsRef<str>,
{
    Registry::default()
        .with(env_filter_or(fallback_directives))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Installs `subscriber` globally and forwards `log` records to it.
///
/// Fails if a global subscriber is already set.
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    set_global_default(subscriber).context("Failed to set subscriber")?;
    Ok(())
}

/// Creates a trace file for `app_name` in `log_folder` and installs a
/// subscriber writing to it. Returns the path of the file.
pub fn init_file_subscriber(
    log_folder: &Path,
    app_name: &str,
    fallback_directives: &str,
) -> anyhow::Result<PathBuf> {
    let (file, path) = create_trace_file(log_folder, app_name)?;
    init_subscriber(get_subscriber(app_name.into(), fallback_directives, file))?;
    Ok(path)
}

fn gen_log_filename(app_name: &str) -> String {
    // No colons, they are not valid in Windows file names
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
    format!("{timestamp}_{app_name}.log")
}

/// Creates a new timestamped log file in `log_folder`, creating the folder if
/// needed
pub fn create_trace_file(log_folder: &Path, app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    create_dir_all(log_folder)
        .with_context(|| format!("Failed to create logging folder: {log_folder:?}"))?;

    let file_path = log_folder.join(gen_log_filename(app_name));
    let file = File::create(&file_path)
        .with_context(|| format!("Failed to create log file: {file_path:?}"))?;
    Ok((file, file_path))
}
