//! Key-value persistence
//!
//! Player name, highscores and settings are small JSON strings kept in a
//! string-to-string store:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `FileStore`: one JSON file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)
//!
//! Callers treat every failure as "nothing stored"; see `HighscoreStore`.

mod store;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use store::{KeyValueStore, MemoryStore, StoreError};

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
