use super::properties::Properties;
use super::unnamed::{Unnamed, UnnamedMut, COUNT_KEY};
use crate::error::{IniError, Result};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Shared read-only stand-in for sections that do not exist.
pub(crate) static EMPTY_SECTION: Lazy<Section> = Lazy::new(|| Section::new(None));

/// One `key=value` line plus the comment printed above it.
///
/// Equality looks at key and value only.
#[derive(Debug, Clone)]
pub struct Entry {
    key: String,
    value: String,
    comment: Option<String>,
}

impl Entry {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Entry {}

/// A named (or global) group of entries, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Section {
    name: Option<String>,
    entries: IndexMap<String, Entry>,
    comment: Option<String>,
    version: u64,
}

impl Section {
    pub(crate) fn new(name: Option<String>) -> Self {
        Self {
            name,
            entries: IndexMap::new(),
            comment: None,
            version: 0,
        }
    }

    /// `None` for the global section.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_global(&self) -> bool {
        self.name.is_none()
    }

    /// Counts every change made to this section's entries and comments.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn modified(&mut self) {
        self.version += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.comment.is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sets `key` to `value`, keeping any existing comment.
    pub fn set(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        match self.entries.get_mut(key) {
            Some(entry) => {
                if entry.value != value {
                    entry.value = value;
                    self.modified();
                }
            }
            None => {
                self.entries.insert(
                    key.to_string(),
                    Entry {
                        key: key.to_string(),
                        value,
                        comment: None,
                    },
                );
                self.modified();
            }
        }
    }

    /// Sets `key` to `value` and replaces its comment (`None` clears it).
    pub fn set_with_comment(&mut self, key: &str, value: impl ToString, comment: Option<&str>) {
        let value = value.to_string();
        let comment = comment.map(str::to_string);
        match self.entries.get_mut(key) {
            Some(entry) => {
                let changed = entry.value != value || entry.comment != comment;
                entry.value = value;
                entry.comment = comment;
                if changed {
                    self.modified();
                }
            }
            None => {
                self.entries.insert(
                    key.to_string(),
                    Entry {
                        key: key.to_string(),
                        value,
                        comment,
                    },
                );
                self.modified();
            }
        }
    }

    /// Header comment printed above `[name]`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<&str>) {
        if self.comment.as_deref() == comment {
            return;
        }
        self.comment = comment.map(str::to_string);
        self.modified();
    }

    pub fn key_comment(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Entry::comment)
    }

    /// Fails with `Misuse` when `key` is not set.
    pub fn set_key_comment(&mut self, key: &str, comment: Option<&str>) -> Result<()> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| IniError::Misuse(format!("Field {} not found", key)))?;
        if entry.comment.as_deref() == comment {
            return Ok(());
        }
        entry.comment = comment.map(str::to_string);
        self.modified();
        Ok(())
    }

    /// Removes `key`, returning the old entry.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let removed = self.entries.shift_remove(key);
        if removed.is_some() {
            self.modified();
        }
        removed
    }

    pub fn unnamed(&self) -> Unnamed<'_> {
        Unnamed::new(self)
    }

    pub fn unnamed_mut(&mut self) -> UnnamedMut<'_> {
        UnnamedMut::new(self)
    }

    /// True for `count` and for integer keys within `1..=count`.
    pub fn is_unnamed_key(&self, key: &str) -> bool {
        if key == COUNT_KEY {
            return true;
        }
        match key.parse::<usize>() {
            Ok(i) => i >= 1 && i <= self.unnamed().len(),
            Err(_) => false,
        }
    }

    /// The comment of the `count` entry, used as the list's comment.
    pub fn unnamed_comment(&self) -> Option<&str> {
        self.key_comment(COUNT_KEY)
    }

    pub fn set_unnamed_comment(&mut self, comment: Option<&str>) {
        match self.entries.get_mut(COUNT_KEY) {
            Some(entry) => {
                if entry.comment.as_deref() != comment {
                    entry.comment = comment.map(str::to_string);
                    self.modified();
                }
            }
            None => self.set_with_comment(COUNT_KEY, "0", comment),
        }
    }

    /// Replaces the whole unnamed list, keeping its comment.
    pub fn set_unnamed<I, S>(&mut self, elems: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let saved = self.unnamed_comment().map(str::to_string);
        let mut list = self.unnamed_mut();
        list.clear();
        list.extend(elems);
        if saved.is_some() || self.is_set(COUNT_KEY) {
            self.set_unnamed_comment(saved.as_deref());
        }
    }
}

impl Properties for Section {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(Entry::value)
    }

    fn is_set(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Structural comparison: name, header comment, entries in order with comments.
pub(crate) fn same_structure(a: &Section, b: &Section) -> bool {
    a.name == b.name
        && a.comment == b.comment
        && a.entries.len() == b.entries.len()
        && a
            .entries
            .values()
            .zip(b.entries.values())
            .all(|(x, y)| x == y && x.comment == y.comment)
}
