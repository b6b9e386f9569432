//! # Line Parser
//!
//! Builds a [`Document`] from text, one trimmed line at a time:
//!
//! | Line | Effect |
//! |---|---|
//! | empty | flushes a pending comment onto the global header, but only while no section has been touched yet; otherwise the comment is dropped |
//! | `#...` | appends to the pending comment |
//! | `[name]` | switches section (allocating it); a pending comment becomes its header comment |
//! | `key=value` | sets the entry in the current section, with the pending comment |
//! | anything else | appends an element to the current section's unnamed list |
//!
//! Parsing never fails on content. Malformed escapes are kept literally and
//! a comment still pending at end of input is discarded. Invalid UTF-8 is
//! decoded lossily. Only I/O errors from the underlying reader are reported.

use crate::codec::unescape;
use crate::document::{Document, COUNT_KEY};
use crate::error::Result;
use std::io::BufRead;

/// Parses a whole document from a string.
pub fn parse_str(text: &str) -> Document {
    let mut document = Document::new();
    let mut parser = LineParser::new(&mut document);
    for line in text.lines() {
        parser.parse_line(line);
    }
    document
}

/// Parses a whole document from a reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Document> {
    let mut document = Document::new();
    parse_into(reader, &mut document)?;
    Ok(document)
}

/// Parses lines from `reader` into an existing document.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, line by line.
pub fn parse_into<R: BufRead>(mut reader: R, document: &mut Document) -> Result<()> {
    let mut parser = LineParser::new(document);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        parser.parse_line(&String::from_utf8_lossy(&line));
    }
    Ok(())
}

/// The parser state machine. Feed it lines with [`parse_line`](LineParser::parse_line).
pub struct LineParser<'a> {
    document: &'a mut Document,
    /// `None` until the first line that touches a section.
    current: Option<String>,
    comment: Option<String>,
}

impl<'a> LineParser<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            current: None,
            comment: None,
        }
    }

    /// Name of the section the next entry goes to (`""` is global).
    pub fn current_section(&self) -> &str {
        self.current.as_deref().unwrap_or("")
    }

    pub fn parse_line(&mut self, line: &str) {
        let line = line.trim();

        if line.is_empty() {
            if self.current.is_none() {
                if let Some(comment) = self.comment.take() {
                    self.document.section_mut("").set_comment(Some(&comment));
                }
            }
            return;
        }

        if let Some(text) = line.strip_prefix('#') {
            match &mut self.comment {
                Some(pending) => {
                    pending.push('\n');
                    pending.push_str(text);
                }
                None => self.comment = Some(text.to_string()),
            }
            return;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let raw = match rest.find(']') {
                Some(end) => &rest[..end],
                None => rest,
            };
            let name = unescape(raw.trim());
            let comment = self.comment.take();
            let section = self.document.section_mut(&name);
            if comment.is_some() {
                section.set_comment(comment.as_deref());
            }
            self.current = Some(name);
            return;
        }

        let comment = self.comment.take();
        let name = self.current.get_or_insert_with(String::new).clone();
        let section = self.document.section_mut(&name);

        match line.split_once('=') {
            Some((key, value)) => {
                let key = unescape(key.trim());
                let value = unescape(value.trim());
                match comment {
                    Some(c) => section.set_with_comment(&key, value, Some(&c)),
                    None => section.set(&key, value),
                }
            }
            None => {
                let index = (section.unnamed().len() + 1).to_string();
                let value = unescape(line);
                match comment {
                    Some(c) => section.set_with_comment(&index, value, Some(&c)),
                    None => section.set(&index, value),
                }
                section.set(COUNT_KEY, index);
            }
        }
    }
}
