//! Key-value storage backends and the persistence gateway.

mod file;
mod gateway;

use std::collections::HashMap;

pub use file::FileStore;
pub use gateway::{PersistenceGateway, Slice, ENTRIES_KEY, SETTINGS_KEY, VOICE_CLIPS_KEY};

/// Local key-value store holding raw JSON blobs.
///
/// Infallible from the journal's point of view: backends log their own
/// failures instead of returning them.
pub trait KeyValueStore {
    /// Raw blob stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `raw` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, raw: &str);

    /// Forget `key`.
    fn remove(&mut self, key: &str);
}

/// In-memory store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with a single pre-seeded key.
    #[must_use]
    pub fn with_value(key: &str, raw: &str) -> Self {
        let mut store = Self::new();
        store.save(key, raw);
        store
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, raw: &str) {
        self.values.insert(key.to_string(), raw.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, raw: &str) {
        (**self).save(key, raw);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}
