//! Platform abstraction layer
//!
//! Handles browser/native differences for persistent storage. Input and
//! timing adapters live in the wasm front end; the simulation itself has
//! no platform dependencies.

pub mod storage;

pub use storage::{KvStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
