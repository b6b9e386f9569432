//! # Persistent Store
//!
//! An [`IniFile`] binds a [`Document`] to a path on disk.
//!
//! - **Loading** parses the file into a staging document, merges it in and
//!   marks the result stored, so a freshly opened store is unmodified. A
//!   store opened on a missing file starts out modified.
//! - **Saving** writes `<path>~` and renames it over `<path>`. If the rename
//!   fails the destination is removed and the rename retried once. Any
//!   failure removes the temp file and returns [`IniError::Persistence`]
//!   carrying the full serialized document.
//! - **Auto-save** saves after every call that changed the document.
//!
//! Stores are normally obtained from a [`StoreRegistry`], which keeps at most
//! one live instance per path.

use crate::document::{Document, Properties};
use crate::error::{IniError, Result};
use crate::parser::parse_reader;
use crate::serializer;
use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

pub mod registry;

pub use registry::StoreRegistry;

/// A store shared between every caller that opened the same path.
pub type SharedIniFile = Arc<Mutex<IniFile>>;

/// Locks a shared store, reporting a poisoned lock as misuse.
pub fn lock(file: &SharedIniFile) -> Result<MutexGuard<'_, IniFile>> {
    file.lock()
        .map_err(|_| IniError::Misuse("store lock poisoned".to_string()))
}

#[derive(Debug)]
pub struct IniFile {
    path: PathBuf,
    document: Document,
    auto_save: bool,
}

impl IniFile {
    /// Opens `path`, reading it if it exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = load(&path)?;
        Ok(Self {
            path,
            document,
            auto_save: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn is_modified(&self) -> bool {
        self.document.is_modified()
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Turning auto-save on saves immediately if there are unsaved changes.
    pub fn set_auto_save(&mut self, enabled: bool) -> Result<()> {
        self.auto_save = enabled;
        if enabled {
            self.save_if_modified()?;
        }
        Ok(())
    }

    /// Runs `f` against the document, then auto-saves if it changed anything.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> Result<R> {
        let out = f(&mut self.document);
        if self.auto_save {
            self.save_if_modified()?;
        }
        Ok(out)
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl ToString) -> Result<()> {
        self.edit(|doc| doc.section_mut(section).set(key, value))
    }

    pub fn set_with_comment(
        &mut self,
        section: &str,
        key: &str,
        value: impl ToString,
        comment: Option<&str>,
    ) -> Result<()> {
        self.edit(|doc| doc.section_mut(section).set_with_comment(key, value, comment))
    }

    /// Removes `key` from `section`, returning its old value.
    pub fn remove(&mut self, section: &str, key: &str) -> Result<Option<String>> {
        self.edit(|doc| {
            doc.get_section_mut(section)
                .and_then(|s| s.remove(key))
                .map(|entry| entry.value().to_string())
        })
    }

    pub fn remove_section(&mut self, section: &str) -> Result<bool> {
        self.edit(|doc| doc.remove_section(section).is_some())
    }

    /// A view of one section whose mutations go through [`edit`](IniFile::edit).
    pub fn section(&mut self, name: &str) -> StoreSection<'_> {
        StoreSection {
            file: self,
            name: name.to_string(),
        }
    }

    /// Saves when there are unsaved changes. Returns whether a write happened.
    pub fn save_if_modified(&mut self) -> Result<bool> {
        if !self.document.is_modified() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn save(&mut self) -> Result<()> {
        let version = self.document.version();
        let content = serializer::to_string(&self.document);
        write_atomic(&self.path, &content)?;
        self.document.mark_stored_at(version);
        Ok(())
    }

    /// Drops in-memory state and reads the file again.
    pub fn reload(&mut self) -> Result<()> {
        let fresh = load(&self.path)?;
        self.document.replace_with(fresh);
        Ok(())
    }
}

/// A single section of an [`IniFile`]. Every mutating call may save.
pub struct StoreSection<'a> {
    file: &'a mut IniFile,
    name: String,
}

impl StoreSection<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.file.document.section(&self.name).comment()
    }

    pub fn unnamed(&self) -> Vec<String> {
        self.file.document.section(&self.name).unnamed().to_vec()
    }

    pub fn set(&mut self, key: &str, value: impl ToString) -> Result<()> {
        self.file.set(&self.name, key, value)
    }

    pub fn set_with_comment(
        &mut self,
        key: &str,
        value: impl ToString,
        comment: Option<&str>,
    ) -> Result<()> {
        self.file.set_with_comment(&self.name, key, value, comment)
    }

    pub fn set_comment(&mut self, comment: Option<&str>) -> Result<()> {
        let name = &self.name;
        self.file.edit(|doc| doc.section_mut(name).set_comment(comment))
    }

    pub fn set_key_comment(&mut self, key: &str, comment: Option<&str>) -> Result<()> {
        let name = &self.name;
        self.file
            .edit(|doc| doc.section_mut(name).set_key_comment(key, comment))?
    }

    pub fn push(&mut self, value: impl ToString) -> Result<()> {
        let name = &self.name;
        self.file
            .edit(|doc| doc.section_mut(name).unnamed_mut().push(value))
    }

    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        self.file.remove(&self.name, key)
    }
}

impl Properties for StoreSection<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.file.document.section(&self.name).get(key)
    }

    fn is_set(&self, key: &str) -> bool {
        self.file.document.section(&self.name).is_set(key)
    }
}

fn load(path: &Path) -> Result<Document> {
    let mut document = Document::new();
    match fs::File::open(path) {
        Ok(file) => {
            let staging = parse_reader(BufReader::new(file))?;
            document.copy_from(&staging, true);
            document.mark_stored();
            debug!(path = %path.display(), sections = document.len(), "loaded store");
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing, starting empty");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(document)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push("~");
    PathBuf::from(name)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp = temp_path(path);
    let failed = |source: io::Error| {
        error!(path = %path.display(), error = %source, "save failed");
        if let Err(cleanup) = fs::remove_file(&temp) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                warn!(path = %temp.display(), error = %cleanup, "could not remove temp file");
            }
        }
        IniError::Persistence {
            path: path.to_path_buf(),
            content: content.to_string(),
            source,
        }
    };

    if let Err(e) = fs::write(&temp, content) {
        return Err(failed(e));
    }

    if let Err(first) = fs::rename(&temp, path) {
        warn!(path = %path.display(), error = %first, "rename failed, replacing destination");
        if let Err(e) = fs::remove_file(path) {
            debug!(path = %path.display(), error = %e, "could not remove destination");
        }
        fs::rename(&temp, path).map_err(failed)?;
    }

    debug!(path = %path.display(), bytes = content.len(), "saved store");
    Ok(())
}
