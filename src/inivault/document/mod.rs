//! # Document Model
//!
//! A [`Document`] is an insertion-ordered set of [`Section`]s. The section
//! without a name is the *global* section: its entries come before the
//! first `[header]` in the text form. Section name `""` always means the
//! global section.
//!
//! ## Change tracking
//!
//! Every section counts its own changes. The document's [`version`]
//! is the sum of those counters plus a counter for structural changes
//! (section allocation and removal), and so strictly increases on every
//! observable change no matter how deep it happened. Persisting code
//! calls [`mark_stored`] after writing; [`is_modified`] compares the two.
//!
//! A document that has never been stored reports itself modified.
//!
//! ## Reading absent sections
//!
//! [`Document::section`] never fails: an absent section reads as a shared
//! empty section, so lookups chain without `Option` handling. Use
//! [`Document::section_mut`] to allocate, or [`Document::section_handle`]
//! for a handle that allocates only on its first mutating call.
//!
//! [`version`]: Document::version
//! [`mark_stored`]: Document::mark_stored
//! [`is_modified`]: Document::is_modified

use indexmap::IndexMap;
use std::fmt;

pub mod builder;
pub mod handle;
pub mod properties;
pub mod section;
pub mod unnamed;

pub use builder::DocumentBuilder;
pub use handle::SectionHandle;
pub use properties::{Defaults, EmptyProperties, KeyRecorder, Prefixed, Properties, RecordedKey};
pub use section::{Entry, Section};
pub use unnamed::{Unnamed, UnnamedMut, COUNT_KEY};

use section::EMPTY_SECTION;

type SectionKey = Option<String>;

fn section_key(name: &str) -> SectionKey {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    sections: IndexMap<SectionKey, Section>,
    /// Structural changes plus the versions of sections that were dropped.
    retired: u64,
    stored_version: Option<u64>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.retired + self.sections.values().map(Section::version).sum::<u64>()
    }

    pub fn is_modified(&self) -> bool {
        self.stored_version != Some(self.version())
    }

    /// Records the current version as the persisted one.
    pub fn mark_stored(&mut self) {
        self.stored_version = Some(self.version());
    }

    pub(crate) fn mark_stored_at(&mut self, version: u64) {
        self.stored_version = Some(version);
    }

    /// Swaps in `other`'s content. The version keeps growing across the swap
    /// and `other`'s stored state is carried over.
    pub fn replace_with(&mut self, mut other: Document) {
        let offset = self.version() + 1;
        other.retired += offset;
        other.stored_version = other.stored_version.map(|v| v + offset);
        *self = other;
    }

    /// The named section, or a shared empty section if absent.
    pub fn section(&self, name: &str) -> &Section {
        self.get_section(name).unwrap_or(&EMPTY_SECTION)
    }

    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.get(&section_key(name))
    }

    /// Mutable access without allocating.
    pub fn get_section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(&section_key(name))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(&section_key(name))
    }

    /// The named section, allocating it when absent.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let key = section_key(name);
        if !self.sections.contains_key(&key) {
            self.retired += 1;
        }
        self.sections
            .entry(key.clone())
            .or_insert_with(|| Section::new(key))
    }

    /// A handle that forwards reads and allocates on the first write.
    pub fn section_handle(&mut self, name: &str) -> SectionHandle<'_> {
        SectionHandle::new(self, name)
    }

    pub fn global(&self) -> Option<&Section> {
        self.sections.get(&None)
    }

    /// Sections in insertion order, global included.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn section_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.sections.keys().map(|k| k.as_deref())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        let removed = self.sections.shift_remove(&section_key(name));
        if let Some(section) = &removed {
            self.retired += section.version() + 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        let dropped: u64 = self.sections.values().map(Section::version).sum();
        self.sections.clear();
        self.retired += dropped + 1;
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.section_mut("").set(key, value);
    }

    pub fn set_with_comment(&mut self, key: &str, value: impl ToString, comment: Option<&str>) {
        self.section_mut("").set_with_comment(key, value, comment);
    }

    pub fn unnamed(&self) -> Unnamed<'_> {
        self.section("").unnamed()
    }

    /// Merges `source` into this document section by section.
    ///
    /// Section comments and entries are replaced only when `overwrite` is set
    /// or the destination has none. With `overwrite == false` this overlays
    /// defaults without touching anything already present.
    pub fn copy_from(&mut self, source: &Document, overwrite: bool) {
        for src in source.sections() {
            let dest = self.section_mut(src.name().unwrap_or(""));
            if overwrite || dest.comment().is_none() {
                dest.set_comment(src.comment());
            }
            for entry in src.entries() {
                if overwrite || !dest.is_set(entry.key()) {
                    dest.set_with_comment(entry.key(), entry.value(), entry.comment());
                }
            }
        }
    }
}

impl Properties for Document {
    fn get(&self, key: &str) -> Option<&str> {
        self.section("").get(key)
    }

    fn is_set(&self, key: &str) -> bool {
        self.section("").is_set(key)
    }
}

/// Structural equality: sections, entries and comments in order. Versions are ignored.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sections.len() == other.sections.len()
            && self
                .sections
                .values()
                .zip(other.sections.values())
                .all(|(a, b)| section::same_structure(a, b))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serializer::to_string(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_modified_until_stored() {
        let mut doc = Document::new();
        assert!(doc.is_modified());
        doc.mark_stored();
        assert!(!doc.is_modified());
        doc.set("a", "1");
        assert!(doc.is_modified());
    }

    #[test]
    fn test_version_tracks_nested_changes() {
        let mut doc = Document::new();
        let v0 = doc.version();
        doc.section_mut("net").set("port", 80);
        let v1 = doc.version();
        assert!(v1 > v0);
        doc.section_mut("net").set_comment(Some("network"));
        let v2 = doc.version();
        assert!(v2 > v1);
        doc.section_mut("net").set("port", 80);
        assert_eq!(doc.version(), v2);
    }

    #[test]
    fn test_version_never_decreases_on_removal() {
        let mut doc = Document::new();
        doc.section_mut("a").set("k", "v");
        doc.section_mut("b").set("k", "v");
        let before = doc.version();
        doc.remove_section("a");
        let after_remove = doc.version();
        assert!(after_remove > before);
        doc.clear();
        assert!(doc.version() > after_remove);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_replace_with_keeps_version_growing() {
        let mut doc = Document::new();
        for i in 0..5 {
            doc.set("k", i);
        }
        let before = doc.version();

        let mut fresh = Document::new();
        fresh.set("k", "loaded");
        fresh.mark_stored();
        doc.replace_with(fresh);

        assert!(doc.version() > before);
        assert!(!doc.is_modified());
        assert_eq!(doc.get("k"), Some("loaded"));

        doc.replace_with(Document::new());
        assert!(doc.is_modified());
    }

    #[test]
    fn test_absent_section_reads_as_empty() {
        let doc = Document::new();
        assert_eq!(doc.section("missing").get("key"), None);
        assert!(doc.section("missing").unnamed().is_empty());
        assert!(!doc.has_section("missing"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_sections_keep_insertion_order() {
        let mut doc = Document::new();
        doc.section_mut("zeta");
        doc.section_mut("alpha");
        doc.set("top", "level");
        doc.section_mut("zeta").set("again", "yes");

        let names: Vec<Option<&str>> = doc.section_names().collect();
        assert_eq!(names, vec![Some("zeta"), Some("alpha"), None]);
    }

    #[test]
    fn test_empty_name_is_global() {
        let mut doc = Document::new();
        doc.section_mut("").set("k", "v");
        assert_eq!(doc.get("k"), Some("v"));
        assert!(doc.global().is_some());
        assert!(doc.global().map(Section::is_global).unwrap_or(false));
    }

    #[test]
    fn test_copy_from_without_overwrite_fills_gaps_only() {
        let mut dest = Document::new();
        dest.section_mut("db").set_with_comment("host", "prod", Some("mine"));
        dest.section_mut("db").set_comment(Some("kept header"));

        let mut defaults = Document::new();
        defaults
            .section_mut("db")
            .set_with_comment("host", "localhost", Some("default host"));
        defaults.section_mut("db").set("port", 5432);
        defaults.section_mut("db").set_comment(Some("default header"));
        defaults
            .section_mut("cache")
            .set_with_comment("ttl", 60, Some("seconds"));

        dest.copy_from(&defaults, false);

        let db = dest.section("db");
        assert_eq!(db.get("host"), Some("prod"));
        assert_eq!(db.key_comment("host"), Some("mine"));
        assert_eq!(db.get("port"), Some("5432"));
        assert_eq!(db.comment(), Some("kept header"));
        assert_eq!(dest.section("cache").get("ttl"), Some("60"));
        assert_eq!(dest.section("cache").key_comment("ttl"), Some("seconds"));
    }

    #[test]
    fn test_copy_from_with_overwrite_replaces() {
        let mut dest = Document::new();
        dest.set_with_comment("k", "old", Some("old comment"));
        let mut src = Document::new();
        src.set("k", "new");

        dest.copy_from(&src, true);
        assert_eq!(dest.get("k"), Some("new"));
        assert_eq!(dest.section("").key_comment("k"), None);
    }

    #[test]
    fn test_structural_equality_ignores_versions() {
        let mut a = Document::new();
        a.set("k", "v1");
        a.set("k", "v2");
        let mut b = Document::new();
        b.set("k", "v2");
        assert_eq!(a, b);
        assert_ne!(a.version(), b.version());

        b.section_mut("extra");
        assert_ne!(a, b);
    }
}
