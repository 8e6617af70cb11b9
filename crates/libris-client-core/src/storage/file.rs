use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use tracing::{debug, info};

use super::DurableStorage;

/// Keeps the slots in a RON file inside a directory
///
/// The whole map is rewritten on each change through a temporary file that is
/// then renamed over the original, so each change either fully lands or not
/// at all.
pub struct FileStorage {
    path: PathBuf,
    slots: BTreeMap<String, String>,
}

impl Debug for FileStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .field("keys", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FileStorage {
    pub const FILE_NAME: &'static str = "session.ron";

    /// Opens the storage in `dir`, creating the directory if needed. A missing
    /// file is treated as empty storage.
    #[tracing::instrument(err(Debug))]
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create storage directory: {dir:?}"))?;
        let path = dir.join(Self::FILE_NAME);
        let slots = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read storage file: {path:?}"))?;
            ron::from_str(&text)
                .with_context(|| format!("storage file is not valid: {path:?}"))?
        } else {
            info!(?path, "No storage file found, starting empty");
            BTreeMap::new()
        };
        Ok(Self { path, slots })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, slots: &BTreeMap<String, String>) -> anyhow::Result<()> {
        let text = ron::ser::to_string_pretty(slots, ron::ser::PrettyConfig::default())
            .context("failed to serialize storage")?;
        let tmp_path = self.path.with_extension("ron.tmp");
        fs::write(&tmp_path, text)
            .with_context(|| format!("failed to write storage file: {tmp_path:?}"))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace storage file: {:?}", self.path))?;
        debug!(path = ?self.path, "storage written");
        Ok(())
    }

    fn update<F: FnOnce(&mut BTreeMap<String, String>)>(&mut self, f: F) -> anyhow::Result<()> {
        let mut slots = self.slots.clone();
        f(&mut slots);
        self.write(&slots)?;
        self.slots = slots;
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.update(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        if !self.slots.contains_key(key) {
            return Ok(());
        }
        self.update(|slots| {
            slots.remove(key);
        })
    }
}
