use std::{
    collections::BTreeMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use super::DurableStorage;

/// Storage that lives as long as the process
///
/// Clones share the same slots, which lets a store be reloaded from what a
/// previous store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<BTreeMap<String, String>>>,
}

impl Debug for MemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self
            .slots
            .lock()
            .expect("mutex poisoned")
            .keys()
            .cloned()
            .collect();
        f.debug_struct("MemoryStorage").field("keys", &keys).finish()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all slots currently set
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.slots.lock().expect("mutex poisoned").clone()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots.lock().expect("mutex poisoned").contains_key(key)
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.slots.lock().expect("mutex poisoned").get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.slots
            .lock()
            .expect("mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.slots.lock().expect("mutex poisoned").remove(key);
        Ok(())
    }
}
