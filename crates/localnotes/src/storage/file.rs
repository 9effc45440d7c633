use std::fs;
use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::storage::KvStore;

const SLOT_EXTENSION: &str = "json";

/// Key-value slots stored as one file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> CoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{SLOT_EXTENSION}")))
    }

    fn ensure_root(&self) -> CoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|error| CoreError::io(&self.root, error))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(CoreError::io(path, error)),
        }
    }

    fn set(&mut self, key: &str, value: String) -> CoreResult<()> {
        let path = self.slot_path(key)?;
        self.ensure_root()?;
        // write-then-rename so a crash never leaves a half-written slot
        let staging = path.with_extension(format!("{SLOT_EXTENSION}.tmp"));
        fs::write(&staging, value.as_bytes()).map_err(|error| CoreError::io(&staging, error))?;
        fs::rename(&staging, &path).map_err(|error| CoreError::io(&path, error))?;
        Ok(())
    }
}

fn validate_key(key: &str) -> CoreResult<()> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(CoreError::InvalidInput(format!("invalid storage key {key}")));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(CoreError::InvalidInput(format!("invalid storage key {key}")));
    }
    Ok(())
}
