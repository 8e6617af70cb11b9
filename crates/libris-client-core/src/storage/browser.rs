use anyhow::{anyhow, Context as _};

use super::DurableStorage;

/// The browser's `localStorage`
///
/// Looked up on every call so that no JS handle is held.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

fn local_storage() -> anyhow::Result<web_sys::Storage> {
    web_sys::window()
        .context("no window found")?
        .local_storage()
        .map_err(|e| anyhow!("local storage access denied: {e:?}"))?
        .context("local storage not available")
}

impl DurableStorage for BrowserStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| anyhow!("failed to read {key:?}: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("failed to write {key:?}: {e:?}"))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| anyhow!("failed to remove {key:?}: {e:?}"))
    }
}
