use anyhow::Context as _;
use tokio::runtime::Runtime;

/// Requests are spawned onto this runtime so it must be entered (or blocked on)
/// before any client call is made
pub fn create_runtime() -> anyhow::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")
}
