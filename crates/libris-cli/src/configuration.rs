use anyhow::Context as _;
use libris_shared::const_config::client::CLIENT_DEFAULT_SERVER_ADDRESS;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// Prepended to every request path
    pub server_address: String,
    /// Where the session is kept between runs
    pub storage_dir: PathBuf,
    /// Where log files are written unless logging to stdout
    pub trace_dir: PathBuf,
    /// Used unless `RUST_LOG` is set
    pub log_filter: String,
}

/// Loads the configuration from the `configuration` folder in the current
/// directory
pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("failed to parse APP_ENVIRONMENT")?;
    get_configuration_from(&base_path.join("configuration"), environment)
}

/// Layers, later ones override earlier ones:
/// 1. Built in defaults
/// 2. `base.toml` (optional)
/// 3. `{environment}.toml` (optional)
/// 4. Environment variables with a prefix of APP and '__' as separator. E.g.
///    `APP_SERVER_ADDRESS=http://example.com` sets
///    `Configuration.server_address`
pub fn get_configuration_from(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .set_default("storage_dir", ".libris")?
        .set_default("trace_dir", "traces")?
        .set_default("log_filter", "info")?
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to build configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
