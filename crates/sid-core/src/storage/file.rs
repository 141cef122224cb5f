//! File-per-key JSON store.

use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::Result;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => None,
            Err(error) => {
                tracing::warn!("Failed to read {}: {}", path.display(), error);
                None
            }
        }
    }

    fn save(&mut self, key: &str, raw: &str) {
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        let result = std::fs::write(&staging, raw).and_then(|()| std::fs::rename(&staging, &path));
        if let Err(error) = result {
            tracing::warn!("Failed to write {}: {}", path.display(), error);
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.path_for(key);
        if let Err(error) = std::fs::remove_file(&path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", path.display(), error);
            }
        }
    }
}
