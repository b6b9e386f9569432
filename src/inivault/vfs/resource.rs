use super::{normalize_path, Backend, VfsReader};
use crate::error::{IniError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

/// Read-only files held in memory, usually from `include_bytes!`.
///
/// Files are registered under their full path. The bundle serves the subtree
/// below `root`, so `ResourceBundle::new("defaults")` answers `app.ini` with
/// the file registered as `defaults/app.ini`.
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    root: String,
    files: HashMap<String, Cow<'static, [u8]>>,
}

impl ResourceBundle {
    pub fn new(root: &str) -> Self {
        Self {
            root: normalize_path(root),
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, path: &str, data: impl Into<Cow<'static, [u8]>>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn insert(&mut self, path: &str, data: impl Into<Cow<'static, [u8]>>) {
        self.files.insert(normalize_path(path), data.into());
    }

    fn full_path(&self, path: &str) -> String {
        normalize_path(&format!("{}/{}", self.root, path))
    }
}

impl Backend for ResourceBundle {
    fn open_raw_read(&self, path: &str) -> Result<VfsReader> {
        let full = self.full_path(path);
        match self.files.get(&full) {
            Some(data) => Ok(Box::new(Cursor::new(data.to_vec()))),
            None => Err(IniError::NotFound(format!("Resource \"{}\" not found", full))),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&self.full_path(path))
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource:{}", self.root)
    }
}

/// A source with no files.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFs;

impl Backend for NullFs {
    fn open_raw_read(&self, _path: &str) -> Result<VfsReader> {
        Err(IniError::NotFound("This filesystem is empty".to_string()))
    }

    fn exists(&self, _path: &str) -> bool {
        false
    }
}

impl fmt::Display for NullFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Properties;
    use crate::vfs::Vfs;

    const DEFAULTS: &[u8] = b"#defaults\n\n[server]\nport=8080\n";

    #[test]
    fn test_bundle_serves_subtree() {
        let bundle = ResourceBundle::new("/defaults/")
            .with_file("defaults/app.ini", DEFAULTS)
            .with_file("other/app.ini", &b"x=1\n"[..]);
        let vfs = Vfs::resources(bundle);

        let doc = vfs.read_document("app.ini").unwrap();
        assert_eq!(doc.section("server").get("port"), Some("8080"));
        assert!(vfs.exists("/app.ini"));
        assert!(!vfs.exists("../other/app.ini"));
        assert_eq!(vfs.to_string(), "resource:defaults");
    }

    #[test]
    fn test_owned_data() {
        let mut bundle = ResourceBundle::new("");
        bundle.insert("gen.ini", b"k=v\n".to_vec());
        assert_eq!(Vfs::resources(bundle).read_string("gen.ini").unwrap(), "k=v\n");
    }

    #[test]
    fn test_null_is_empty() {
        let err = Vfs::null().read_bytes("x").unwrap_err();
        assert!(err.is_not_found());
    }
}
