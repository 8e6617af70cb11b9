//! Durable key-value storage backing the session mirror
//!
//! Every operation is atomic for its key only. Nothing is atomic across keys.

use std::fmt::Debug;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(not(target_arch = "wasm32"))]
mod file;
mod memory;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// String slots that survive the client being restarted
pub trait DurableStorage: Send + Debug {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removing a key that is not present is not an error
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}
