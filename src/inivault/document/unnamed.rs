//! Ordered lists stored as ordinary entries: `count` holds the length and
//! the keys `1..=count` hold the elements.

use super::properties::Properties;
use super::section::{Entry, Section};
use crate::error::{IniError, Result};

pub const COUNT_KEY: &str = "count";

/// Read-only list view over a section.
#[derive(Clone, Copy)]
pub struct Unnamed<'a> {
    section: &'a Section,
}

impl<'a> Unnamed<'a> {
    pub(crate) fn new(section: &'a Section) -> Self {
        Self { section }
    }

    /// The declared element count. A missing or unparsable `count` reads as 0.
    pub fn len(&self) -> usize {
        self.section
            .get(COUNT_KEY)
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entry(&self, index: usize) -> Option<&'a Entry> {
        self.section.entry(&(index + 1).to_string())
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.entry(index).map(Entry::value)
    }

    /// Elements in order, stopping at the first missing key.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let this = *self;
        (0..this.len()).map_while(move |i| this.get(i))
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

/// Mutable list view over a section.
pub struct UnnamedMut<'a> {
    section: &'a mut Section,
}

impl<'a> UnnamedMut<'a> {
    pub(crate) fn new(section: &'a mut Section) -> Self {
        Self { section }
    }

    pub fn len(&self) -> usize {
        self.section.unnamed().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.section.unnamed().get(index)
    }

    /// Appends one element: writes key `count + 1`, then the new `count`.
    pub fn push(&mut self, value: impl ToString) {
        self.push_with_comment(value, None);
    }

    pub fn push_with_comment(&mut self, value: impl ToString, comment: Option<&str>) {
        let next = (self.len() + 1).to_string();
        match comment {
            Some(_) => self.section.set_with_comment(&next, value, comment),
            None => self.section.set(&next, value),
        }
        self.section.set(COUNT_KEY, &next);
    }

    pub fn extend<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        for value in values {
            self.push(value);
        }
    }

    /// Replaces element `index`, or appends when `index == len`. Returns the old value.
    pub fn set(&mut self, index: usize, value: impl ToString) -> Result<Option<String>> {
        let len = self.len();
        if index == len {
            self.push(value);
            return Ok(None);
        }
        if index > len {
            return Err(IniError::Misuse(format!(
                "Unnamed index {} out of range (len {})",
                index, len
            )));
        }
        let key = (index + 1).to_string();
        let previous = self.section.get(&key).map(str::to_string);
        self.section.set(&key, value);
        Ok(previous)
    }

    /// Removes every element and the `count` entry.
    pub fn clear(&mut self) {
        let len = self.len();
        for i in 1..=len {
            self.section.remove(&i.to_string());
        }
        self.section.remove(COUNT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_all_on_empty_section() {
        let mut s = Section::new(None);
        s.unnamed_mut().extend(["a", "b", "c"]);

        assert_eq!(s.get("count"), Some("3"));
        assert_eq!(s.get("1"), Some("a"));
        assert_eq!(s.get("2"), Some("b"));
        assert_eq!(s.get("3"), Some("c"));
        assert_eq!(s.unnamed().len(), 3);
        assert_eq!(s.unnamed().to_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_push_continues_existing_numbering() {
        let mut s = Section::new(None);
        s.set("count", 2);
        s.set("1", "line1");
        s.set("2", "line2");
        s.unnamed_mut().push("line3");

        assert_eq!(s.get("count"), Some("3"));
        assert_eq!(s.unnamed().get(2), Some("line3"));
    }

    #[test]
    fn test_set_replaces_or_appends() {
        let mut s = Section::new(None);
        let mut list = s.unnamed_mut();
        list.push("a");
        assert_eq!(list.set(0, "A").unwrap(), Some("a".to_string()));
        assert_eq!(list.set(1, "B").unwrap(), None);
        assert!(matches!(list.set(5, "x"), Err(IniError::Misuse(_))));
        assert_eq!(s.unnamed().to_vec(), vec!["A", "B"]);
    }

    #[test]
    fn test_clear_removes_count_and_elements() {
        let mut s = Section::new(None);
        s.set("name", "kept");
        s.unnamed_mut().extend(["a", "b"]);
        s.unnamed_mut().clear();

        assert!(s.unnamed().is_empty());
        let keys: Vec<&str> = s.keys().collect();
        assert_eq!(keys, vec!["name"]);
    }

    #[test]
    fn test_iter_stops_at_gap() {
        let mut s = Section::new(None);
        s.set("count", 3);
        s.set("1", "a");
        s.set("3", "c");
        assert_eq!(s.unnamed().len(), 3);
        assert_eq!(s.unnamed().to_vec(), vec!["a"]);
    }

    #[test]
    fn test_garbage_count_reads_as_empty() {
        let mut s = Section::new(None);
        s.set("count", "many");
        assert_eq!(s.unnamed().len(), 0);
    }
}
