use super::{lock, IniFile, SharedIniFile};
use crate::document::Document;
use crate::error::{IniError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Path-keyed cache of open stores.
///
/// Every `open` of the same file returns the same [`SharedIniFile`], so there
/// is at most one live document per path. Paths are made absolute before
/// lookup. The check-then-create step runs under a single lock.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<PathBuf, SharedIniFile>>,
    auto_save: bool,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores created from here on start with auto-save enabled.
    pub fn with_auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    fn stores(&self) -> Result<MutexGuard<'_, HashMap<PathBuf, SharedIniFile>>> {
        self.stores
            .lock()
            .map_err(|_| IniError::Misuse("store registry lock poisoned".to_string()))
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<SharedIniFile> {
        let key = std::path::absolute(path.as_ref())?;
        let mut stores = self.stores()?;
        if let Some(file) = stores.get(&key) {
            return Ok(Arc::clone(file));
        }

        debug!(path = %key.display(), "opening store");
        let mut file = IniFile::open(&key)?;
        file.set_auto_save(self.auto_save)?;
        let file = Arc::new(Mutex::new(file));
        stores.insert(key, Arc::clone(&file));
        Ok(file)
    }

    /// Opens `path` and fills in anything it lacks from `defaults`.
    ///
    /// Values already in the file win. With auto-save on, new defaults are
    /// written out straight away.
    pub fn open_with_defaults<P: AsRef<Path>>(
        &self,
        path: P,
        defaults: &Document,
    ) -> Result<SharedIniFile> {
        let file = self.open(path)?;
        lock(&file)?.edit(|doc| doc.copy_from(defaults, false))?;
        Ok(file)
    }

    pub fn len(&self) -> usize {
        self.stores
            .lock()
            .map(|stores| stores.len())
            .unwrap_or_else(|poisoned| poisoned.into_inner().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets the cached store for `path`. Existing handles keep working.
    pub fn evict<P: AsRef<Path>>(&self, path: P) -> Result<Option<SharedIniFile>> {
        let key = std::path::absolute(path.as_ref())?;
        Ok(self.stores()?.remove(&key))
    }
}
