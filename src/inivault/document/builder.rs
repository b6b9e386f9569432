use super::Document;

/// Fluent construction of documents, mostly for defaults and tests.
///
/// ```
/// use inivault::document::DocumentBuilder;
/// use inivault::document::Properties;
///
/// let doc = DocumentBuilder::new()
///     .put("name", "vault")
///     .section_with_comment("paths", "where things live")
///     .put_all(["/etc", "/usr/share"])
///     .build();
/// assert_eq!(doc.get("name"), Some("vault"));
/// assert_eq!(doc.section("paths").unnamed().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
    current: String,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            current: String::new(),
        }
    }

    /// Merges `other` in, replacing what is already there.
    pub fn copy(mut self, other: &Document) -> Self {
        self.document.copy_from(other, true);
        self
    }

    /// Switches to `name`. The section is only allocated by a later `put`.
    pub fn section(mut self, name: &str) -> Self {
        self.current = name.to_string();
        self
    }

    pub fn section_with_comment(mut self, name: &str, comment: &str) -> Self {
        self.current = name.to_string();
        self.document.section_mut(name).set_comment(Some(comment));
        self
    }

    pub fn put(mut self, key: &str, value: impl ToString) -> Self {
        self.document.section_mut(&self.current).set(key, value);
        self
    }

    pub fn put_with_comment(mut self, key: &str, value: impl ToString, comment: &str) -> Self {
        self.document
            .section_mut(&self.current)
            .set_with_comment(key, value, Some(comment));
        self
    }

    /// Appends to the current section's unnamed list.
    pub fn put_all<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.document
            .section_mut(&self.current)
            .unnamed_mut()
            .extend(values);
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Properties;

    #[test]
    fn test_builder_sections_and_comments() {
        let doc = DocumentBuilder::new()
            .put_with_comment("title", "demo", "shown in the header")
            .section("empty")
            .section_with_comment("server", "listener")
            .put("port", 80)
            .build();

        assert_eq!(doc.section("").key_comment("title"), Some("shown in the header"));
        assert!(!doc.has_section("empty"));
        assert_eq!(doc.section("server").comment(), Some("listener"));
        assert_eq!(doc.section("server").get("port"), Some("80"));
    }

    #[test]
    fn test_builder_copy_overwrites() {
        let base = DocumentBuilder::new().put("a", 1).put("b", 2).build();
        let doc = DocumentBuilder::new().put("a", 0).copy(&base).build();
        assert_eq!(doc.get("a"), Some("1"));
        assert_eq!(doc.get("b"), Some("2"));
    }
}
