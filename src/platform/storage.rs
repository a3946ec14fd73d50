//! Key-value storage seam
//!
//! The engine persists through this trait so it never touches the browser
//! directly. LocalStorage backs it on wasm; an in-memory map backs native
//! builds and tests.

use std::collections::HashMap;

/// Minimal key-value store. Failures are soft: a missing or unreadable key
/// is `None`, a failed write returns `false` and the caller carries on with
/// its in-memory value.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns false if the write did not stick (e.g. quota exceeded)
    fn set(&mut self, key: &str, value: &str) -> bool;
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.map.insert(key.to_string(), value.to_string());
        true
    }
}

/// Browser LocalStorage (wasm only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        match Self::storage() {
            Some(storage) => storage.set_item(key, value).is_ok(),
            None => false,
        }
    }
}
