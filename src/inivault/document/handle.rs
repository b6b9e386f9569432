use super::properties::Properties;
use super::section::Section;
use super::unnamed::Unnamed;
use super::Document;
use crate::error::Result;

/// A section that may not exist yet.
///
/// `Lazy` forwards reads to the shared empty section and allocates the real
/// section in its document on the first mutating call.
pub enum SectionHandle<'a> {
    Materialized(&'a mut Section),
    Lazy {
        name: String,
        document: &'a mut Document,
    },
}

impl<'a> SectionHandle<'a> {
    pub(crate) fn new(document: &'a mut Document, name: &str) -> Self {
        if document.has_section(name) {
            SectionHandle::Materialized(document.section_mut(name))
        } else {
            SectionHandle::Lazy {
                name: name.to_string(),
                document,
            }
        }
    }

    pub fn is_materialized(&self) -> bool {
        match self {
            SectionHandle::Materialized(_) => true,
            SectionHandle::Lazy { name, document } => document.has_section(name),
        }
    }

    fn read(&self) -> &Section {
        match self {
            SectionHandle::Materialized(section) => section,
            SectionHandle::Lazy { name, document } => document.section(name),
        }
    }

    fn write(&mut self) -> &mut Section {
        match self {
            SectionHandle::Materialized(section) => section,
            SectionHandle::Lazy { name, document } => document.section_mut(name),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SectionHandle::Materialized(section) => section.name(),
            SectionHandle::Lazy { name, .. } if name.is_empty() => None,
            SectionHandle::Lazy { name, .. } => Some(name.as_str()),
        }
    }

    pub fn version(&self) -> u64 {
        self.read().version()
    }

    pub fn comment(&self) -> Option<&str> {
        self.read().comment()
    }

    pub fn key_comment(&self, key: &str) -> Option<&str> {
        self.read().key_comment(key)
    }

    pub fn unnamed(&self) -> Unnamed<'_> {
        self.read().unnamed()
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.write().set(key, value);
    }

    pub fn set_with_comment(&mut self, key: &str, value: impl ToString, comment: Option<&str>) {
        self.write().set_with_comment(key, value, comment);
    }

    pub fn set_comment(&mut self, comment: Option<&str>) {
        self.write().set_comment(comment);
    }

    pub fn set_key_comment(&mut self, key: &str, comment: Option<&str>) -> Result<()> {
        self.write().set_key_comment(key, comment)
    }

    pub fn set_unnamed_comment(&mut self, comment: Option<&str>) {
        self.write().set_unnamed_comment(comment);
    }

    pub fn push_unnamed(&mut self, value: impl ToString) {
        self.write().unnamed_mut().push(value);
    }

    pub fn set_unnamed<I, S>(&mut self, elems: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.write().set_unnamed(elems);
    }

    /// Removing from a section that was never allocated does not allocate it.
    pub fn remove(&mut self, key: &str) {
        match self {
            SectionHandle::Materialized(section) => {
                section.remove(key);
            }
            SectionHandle::Lazy { name, document } => {
                if let Some(section) = document.get_section_mut(name) {
                    section.remove(key);
                }
            }
        }
    }
}

impl Properties for SectionHandle<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.read().get(key)
    }

    fn is_set(&self, key: &str) -> bool {
        self.read().is_set(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_handle_reads_without_allocating() {
        let mut doc = Document::new();
        let handle = doc.section_handle("later");
        assert!(!handle.is_materialized());
        assert_eq!(handle.get("k"), None);
        assert_eq!(handle.name(), Some("later"));
        assert_eq!(handle.version(), 0);
        drop(handle);
        assert!(!doc.has_section("later"));
    }

    #[test]
    fn test_lazy_handle_allocates_on_write() {
        let mut doc = Document::new();
        let mut handle = doc.section_handle("later");
        handle.remove("nothing");
        assert!(!handle.is_materialized());
        handle.set("k", "v");
        handle.set("k2", "v2");
        assert!(handle.is_materialized());
        assert_eq!(handle.get("k"), Some("v"));

        assert_eq!(doc.section("later").get("k2"), Some("v2"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_materialized_handle() {
        let mut doc = Document::new();
        doc.section_mut("s").set("a", 1);
        let mut handle = doc.section_handle("s");
        assert!(handle.is_materialized());
        handle.push_unnamed("x");
        assert_eq!(handle.unnamed().to_vec(), vec!["x"]);
    }
}
