//! # Escaping Codec
//!
//! Keys, section names and values are written with a small, URL-flavoured
//! escaping scheme so that any text survives the line-oriented grammar:
//!
//! - `%`, tab, CR, LF and `+` are always written as `%XX` (uppercase hex of
//!   the character's low byte).
//! - `]` is escaped only inside section names, `=` only inside keys.
//! - A space in the first or last position becomes `+`; inner spaces are
//!   written literally.
//!
//! Unescaping is tolerant: `+` always decodes to a space, `%XX` decodes only
//! when two hex digits follow, and anything else passes through unchanged.
//! For every printable ASCII string `s`, `unescape(&escape(s, ctx)) == s`.

const HEXCHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Where an escaped string is going to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    SectionName,
    Key,
    Value,
}

fn push_hex(out: &mut String, c: char) {
    let b = (c as u32 & 0xFF) as usize;
    out.push('%');
    out.push(HEXCHARS[b >> 4] as char);
    out.push(HEXCHARS[b & 0xF] as char);
}

/// Escapes `text` for the given context.
pub fn escape(text: &str, context: EscapeContext) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, context);
    out
}

/// Escapes `text` as if it were used in every context at once.
pub fn escape_all(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    write_escaped(&mut out, text, true, true);
    out
}

pub(crate) fn escape_into(out: &mut String, text: &str, context: EscapeContext) {
    write_escaped(
        out,
        text,
        context == EscapeContext::SectionName,
        context == EscapeContext::Key,
    );
}

fn write_escaped(out: &mut String, text: &str, section: bool, key: bool) {
    let last = text.chars().count().saturating_sub(1);
    for (i, c) in text.chars().enumerate() {
        match c {
            '%' | '\t' | '\r' | '\n' | '+' => push_hex(out, c),
            ']' if section => push_hex(out, c),
            '=' if key => push_hex(out, c),
            ' ' if i == 0 || i == last => out.push('+'),
            _ => out.push(c),
        }
    }
}

/// Reverses [`escape`]. Malformed `%` sequences are kept literally.
pub fn unescape(wire: &str) -> String {
    let chars: Vec<char> = wire.chars().collect();
    let mut out = String::with_capacity(wire.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '+' {
            out.push(' ');
            i += 1;
            continue;
        }
        if c == '%' {
            if let (Some(hi), Some(lo)) = (
                chars.get(i + 1).and_then(|h| h.to_digit(16)),
                chars.get(i + 2).and_then(|l| l.to_digit(16)),
            ) {
                out.push(char::from((hi * 16 + lo) as u8));
                i += 3;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}
