mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Logical keys the application persists
pub mod keys {
    pub const FAVORITES: &str = "favorites";
    pub const HISTORY: &str = "history";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "language";
    pub const TRANSLATION_CACHE: &str = "translation_cache";
}

/// String key/value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

/// Read a JSON value, falling back to `T::default()` when the key is
/// missing, unreadable or corrupt.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Stored value for '{}' is corrupt, using default: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("Failed to read '{}', using default: {}", key, e);
            T::default()
        }
    }
}

/// Serialize `value` as JSON and write it under `key`
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
