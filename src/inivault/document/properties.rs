//! The key lookup capability shared by sections, documents and the
//! overlay/recording wrappers built on top of them.

use crate::error::{IniError, Result};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

/// Read access to string key/value pairs.
///
/// Only [`get`](Properties::get) is required. Typed reads treat a missing or
/// empty value as "use the default" and report garbage as `Malformed`.
pub trait Properties {
    fn get(&self, key: &str) -> Option<&str>;

    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    fn get_parsed<T>(&self, key: &str, default: T) -> Result<T>
    where
        Self: Sized,
        T: FromStr + fmt::Display,
        T::Err: fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) if raw.is_empty() => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| IniError::Malformed {
                key: key.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Anything other than a case-insensitive `true` reads as `false`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            None => default,
            Some(raw) if raw.is_empty() => default,
            Some(raw) => raw.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl<P: Properties + ?Sized> Properties for &P {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }

    fn is_set(&self, key: &str) -> bool {
        (**self).is_set(key)
    }
}

/// The empty key space.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyProperties;

pub static EMPTY_PROPERTIES: EmptyProperties = EmptyProperties;

impl Properties for EmptyProperties {
    fn get(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// Reads from `wrapped`, falling back to `defaults` for unset keys.
#[derive(Debug, Clone)]
pub struct Defaults<W, D> {
    wrapped: W,
    defaults: D,
}

impl<W: Properties, D: Properties> Defaults<W, D> {
    pub fn new(wrapped: W, defaults: D) -> Self {
        Self { wrapped, defaults }
    }
}

impl<W: Properties, D: Properties> Properties for Defaults<W, D> {
    fn get(&self, key: &str) -> Option<&str> {
        self.wrapped.get(key).or_else(|| self.defaults.get(key))
    }

    fn is_set(&self, key: &str) -> bool {
        self.wrapped.is_set(key) || self.defaults.is_set(key)
    }
}

/// Views the keys of `parent` that start with `prefix`, with the prefix stripped.
#[derive(Debug, Clone)]
pub struct Prefixed<P> {
    parent: P,
    prefix: String,
}

impl<P: Properties> Prefixed<P> {
    pub fn new(parent: P, prefix: impl Into<String>) -> Self {
        Self {
            parent,
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl<P: Properties> Properties for Prefixed<P> {
    fn get(&self, key: &str) -> Option<&str> {
        self.parent.get(&self.full_key(key))
    }

    fn is_set(&self, key: &str) -> bool {
        self.parent.is_set(&self.full_key(key))
    }
}

/// A key that was asked for through a [`KeyRecorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedKey {
    pub type_name: Option<&'static str>,
    pub key: String,
    pub default: Option<String>,
}

impl fmt::Display for RecordedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{}", self.type_name.unwrap_or("no type"))?;
        match &self.default {
            Some(default) => writeln!(f, "{}={}", self.key, default),
            None => writeln!(f, "#{}=", self.key),
        }
    }
}

/// Passes reads through to `inner` while recording every key and default
/// asked for. Its `Display` output is a commented template of those keys.
#[derive(Debug)]
pub struct KeyRecorder<P> {
    inner: P,
    recorded: Mutex<Vec<RecordedKey>>,
}

impl<P: Properties> KeyRecorder<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            recorded: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, type_name: Option<&'static str>, key: &str, default: Option<String>) {
        let item = RecordedKey {
            type_name,
            key: key.to_string(),
            default,
        };
        if let Ok(mut recorded) = self.recorded.lock() {
            if !recorded
                .iter()
                .any(|r| r.key == item.key && r.default == item.default)
            {
                recorded.push(item);
            }
        }
    }

    pub fn recorded(&self) -> Vec<RecordedKey> {
        self.recorded
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl<P: Properties> Properties for KeyRecorder<P> {
    fn get(&self, key: &str) -> Option<&str> {
        self.record(Some("String"), key, None);
        self.inner.get(key)
    }

    fn is_set(&self, key: &str) -> bool {
        self.record(None, key, None);
        self.inner.is_set(key)
    }

    fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.record(Some("String"), key, Some(default.to_string()));
        self.inner.get(key).unwrap_or(default)
    }

    fn get_parsed<T>(&self, key: &str, default: T) -> Result<T>
    where
        Self: Sized,
        T: FromStr + fmt::Display,
        T::Err: fmt::Display,
    {
        self.record(Some(std::any::type_name::<T>()), key, Some(default.to_string()));
        self.inner.get_parsed(key, default)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.record(Some("bool"), key, Some(default.to_string()));
        self.inner.get_bool(key, default)
    }
}

impl<P: Properties> fmt::Display for KeyRecorder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.recorded() {
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}
