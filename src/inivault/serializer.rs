//! # Serializer
//!
//! Emits the grammar read by [`crate::parser`], deterministically:
//!
//! ```text
//! #global header comment        <- global section first, if present
//!                               <- blank separator instead of a [header]
//! key=value
//!
//! #section comment
//! [name]
//!
//! element one                   <- unnamed list, positional
//! element two
//! #entry comment
//! key=value
//! ```
//!
//! A section gets the positional list form only when `count` is set and
//! every key `1..=count` exists. Otherwise `count` and the numbered keys
//! are written as ordinary entries.

use crate::codec::{escape_into, EscapeContext};
use crate::document::{Document, Entry, Properties, Section, COUNT_KEY};
use std::collections::HashSet;
use std::io::{self, Write};

pub fn to_string(document: &Document) -> String {
    let mut out = String::new();
    if let Some(global) = document.global() {
        write_section(&mut out, global);
    }
    for section in document.sections().filter(|s| !s.is_global()) {
        write_section(&mut out, section);
    }
    out
}

pub fn write_document<W: Write>(mut writer: W, document: &Document) -> io::Result<()> {
    writer.write_all(to_string(document).as_bytes())?;
    writer.flush()
}

fn write_comment(out: &mut String, comment: Option<&str>) {
    let Some(comment) = comment.map(str::trim) else {
        return;
    };
    if comment.is_empty() {
        return;
    }
    for line in comment.lines() {
        out.push('#');
        out.push_str(line);
        out.push('\n');
    }
}

fn write_entry(out: &mut String, entry: &Entry, positional: bool) {
    write_comment(out, entry.comment());
    if positional {
        escape_into(out, entry.value(), EscapeContext::Key);
    } else {
        escape_into(out, entry.key(), EscapeContext::Key);
        out.push('=');
        escape_into(out, entry.value(), EscapeContext::Value);
    }
    out.push('\n');
}

/// Keys covered by a clean `count` + `1..=count` list, or `None`.
fn unnamed_keys(section: &Section) -> Option<(usize, HashSet<String>)> {
    let count: usize = section.get(COUNT_KEY)?.trim().parse().ok()?;
    let mut skip = HashSet::with_capacity(count + 1);
    skip.insert(COUNT_KEY.to_string());
    for i in 1..=count {
        let key = i.to_string();
        if !section.is_set(&key) {
            return None;
        }
        skip.insert(key);
    }
    Some((count, skip))
}

fn write_section(out: &mut String, section: &Section) {
    match section.name() {
        None => {
            write_comment(out, section.comment());
            out.push('\n');
        }
        Some(name) => {
            out.push('\n');
            write_comment(out, section.comment());
            out.push('[');
            escape_into(out, name, EscapeContext::SectionName);
            out.push_str("]\n\n");
        }
    }

    let skip = match unnamed_keys(section) {
        Some((count, skip)) => {
            let list = section.unnamed();
            for entry in (0..count).filter_map(|i| list.entry(i)) {
                write_entry(out, entry, true);
            }
            skip
        }
        None => HashSet::new(),
    };

    for entry in section.entries().filter(|e| !skip.contains(e.key())) {
        write_entry(out, entry, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBuilder;
    use crate::parser::parse_str;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_layout_of_global_and_named_sections() {
        let mut doc = Document::new();
        doc.section_mut("").set_comment(Some("Comment"));
        doc.set_with_comment("test", "test value+", Some("Multiline\ncomment"));
        doc.section_mut("S1").set_comment(Some("Section comment"));
        doc.section_mut("S1").set("k", "v");

        let expected = "#Comment\n\n#Multiline\n#comment\ntest=test value%2B\n\n#Section comment\n[S1]\n\nk=v\n";
        assert_eq!(to_string(&doc), expected);
    }

    #[test]
    fn test_global_emitted_first_even_if_created_later() {
        let mut doc = Document::new();
        doc.section_mut("b").set("x", 1);
        doc.set("top", 2);
        assert_eq!(to_string(&doc), "\ntop=2\n\n[b]\n\nx=1\n");
    }

    #[test]
    fn test_unnamed_list_written_positionally() {
        let mut doc = Document::new();
        let lst = doc.section_mut("lst");
        lst.set("count", 2);
        lst.set("1", "line1");
        lst.set("2", "line=2");
        lst.set("name", "n");
        lst.unnamed_mut().push("line3");

        assert_eq!(to_string(&doc), "\n[lst]\n\nline1\nline%3D2\nline3\nname=n\n");
    }

    #[test]
    fn test_broken_list_falls_back_to_named_entries() {
        let mut doc = Document::new();
        let lst = doc.section_mut("lst");
        lst.set("count", 3);
        lst.set("1", "a");
        lst.set("3", "c");
        assert_eq!(to_string(&doc), "\n[lst]\n\ncount=3\n1=a\n3=c\n");
    }

    #[test]
    fn test_escaping_per_context() {
        let mut doc = Document::new();
        doc.section_mut("a]b=c").set_with_comment(" k=y ", " v=] ", None);
        assert_eq!(to_string(&doc), "\n[a%5Db=c]\n\n+k%3Dy+=+v=]+\n");
    }

    #[test]
    fn test_round_trip_through_parser() {
        let doc = DocumentBuilder::new()
            .put_with_comment("name", "vault", "the name")
            .section_with_comment("paths", "search\npath")
            .put_all(["/etc", "/usr/local/etc"])
            .put("mode", "strict")
            .section("escapes")
            .put("%+=", " \t ")
            .build();

        let text = to_string(&doc);
        assert_eq!(parse_str(&text), doc);
        assert_eq!(to_string(&parse_str(&text)), text);
    }

    #[test]
    fn test_key_with_leading_hash_reads_back_as_comment() {
        let mut doc = Document::new();
        doc.set("#k", "v");

        let text = to_string(&doc);
        assert_eq!(text, "\n#k=v\n");
        let parsed = parse_str(&text);
        assert_eq!(parsed.get("#k"), None);
        assert!(!parsed.has_section(""));
    }

    #[test]
    fn test_unnamed_element_with_leading_bracket_opens_section() {
        let mut doc = Document::new();
        doc.section_mut("s").unnamed_mut().push("[x");

        let parsed = parse_str(&to_string(&doc));
        assert!(parsed.section("s").unnamed().is_empty());
        assert!(parsed.has_section("x"));
        assert_ne!(parsed, doc);
    }

    #[test]
    fn test_empty_unnamed_element_reads_back_as_blank_line() {
        let mut doc = Document::new();
        let list = doc.section_mut("s");
        list.unnamed_mut().push("");
        list.unnamed_mut().push("b");

        let text = to_string(&doc);
        assert_eq!(text, "\n[s]\n\n\nb\n");
        assert_eq!(parse_str(&text).section("s").unnamed().to_vec(), vec!["b"]);
    }

    fn printable_string(rng: &mut StdRng, max: usize) -> String {
        let len = rng.gen_range(0..=max);
        (0..len).map(|_| char::from(rng.gen_range(0x20u8..=0x7E))).collect()
    }

    /// A line the grammar can carry: not starting with `#` or `[`.
    fn safe_text(rng: &mut StdRng, max: usize) -> String {
        loop {
            let s = printable_string(rng, max);
            if !s.starts_with('#') && !s.starts_with('[') {
                return s;
            }
        }
    }

    fn comment_text(rng: &mut StdRng) -> Option<String> {
        if rng.gen_bool(0.5) {
            return None;
        }
        let lines = rng.gen_range(1..=3);
        let text: Vec<String> = (0..lines)
            .map(|_| format!("c{}", printable_string(rng, 12).trim()))
            .collect();
        Some(text.join("\n"))
    }

    fn random_document(rng: &mut StdRng) -> Document {
        let mut doc = Document::new();
        if rng.gen_bool(0.7) {
            let global = doc.section_mut("");
            global.set_comment(comment_text(rng).as_deref());
            global.set(&format!("g{}", safe_text(rng, 8)), safe_text(rng, 16));
        }
        for s in 0..rng.gen_range(0..5) {
            let name = format!("s{}{}", s, printable_string(rng, 10));
            let comment = comment_text(rng);
            let section = doc.section_mut(&name);
            section.set_comment(comment.as_deref());
            let items = rng.gen_range(0..4);
            if rng.gen_bool(0.5) {
                for _ in 0..items {
                    let value = format!("v{}", printable_string(rng, 16));
                    let comment = comment_text(rng);
                    section
                        .unnamed_mut()
                        .push_with_comment(value, comment.as_deref());
                }
            }
            for _ in 0..rng.gen_range(0..6) {
                let key = format!("k{}", printable_string(rng, 10));
                let comment = comment_text(rng);
                section.set_with_comment(&key, printable_string(rng, 20), comment.as_deref());
            }
        }
        doc
    }

    #[test]
    fn test_random_documents_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x5eed_1a1);
        for _ in 0..500 {
            let doc = random_document(&mut rng);
            let text = to_string(&doc);
            let parsed = parse_str(&text);
            assert_eq!(parsed, doc, "round trip failed for:\n{}", text);
        }
    }

    #[test]
    fn test_write_document_matches_to_string() {
        let doc = DocumentBuilder::new().put("a", 1).build();
        let mut buf = Vec::new();
        write_document(&mut buf, &doc).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_string(&doc));
    }
}
