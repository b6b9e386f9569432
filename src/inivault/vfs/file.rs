use super::{normalize_path, Vfs, VfsReader, VfsWriter};
use crate::document::Document;
use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// A path bound to the [`Vfs`] it lives in. The path is kept normalized.
#[derive(Debug, Clone)]
pub struct VFile {
    vfs: Vfs,
    path: String,
}

impl VFile {
    pub fn new(vfs: Vfs, path: &str) -> Self {
        Self {
            vfs,
            path: normalize_path(path),
        }
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn open_read(&self) -> Result<VfsReader> {
        self.vfs.open_read(&self.path)
    }

    pub fn open_write(&self, append: bool) -> Result<VfsWriter> {
        self.vfs.open_write(&self.path, append)
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.vfs.read_bytes(&self.path)
    }

    pub fn read_string(&self) -> Result<String> {
        self.vfs.read_string(&self.path)
    }

    pub fn read_document(&self) -> Result<Document> {
        self.vfs.read_document(&self.path)
    }

    pub fn write_document(&self, document: &Document) -> Result<()> {
        self.vfs.write_document(&self.path, document)
    }

    pub fn local_path(&self) -> Option<PathBuf> {
        self.vfs.local_path(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.vfs.exists(&self.path)
    }

    pub fn exists_and_writeable(&self) -> bool {
        self.vfs.exists_and_writeable(&self.path)
    }
}

impl fmt::Display for VFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentBuilder, Properties};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_file_handle_round_trip() {
        let dir = tempdir().unwrap();
        let file = Vfs::local(dir.path()).file("/conf/./app.ini");
        assert_eq!(file.to_string(), "conf/app.ini");
        assert!(!file.exists());

        let doc = DocumentBuilder::new().put("k", "v").build();
        file.write_document(&doc).unwrap();
        assert!(file.exists());
        assert!(file.exists_and_writeable());
        assert_eq!(file.read_document().unwrap().get("k"), Some("v"));
        assert_eq!(file.local_path(), Some(dir.path().join("conf/app.ini")));
    }

    #[test]
    fn test_append_through_handle() {
        let dir = tempdir().unwrap();
        let file = Vfs::local(dir.path()).file("notes.txt");
        for line in ["a\n", "b\n"] {
            let mut w = file.open_write(true).unwrap();
            w.write_all(line.as_bytes()).unwrap();
            w.finish().unwrap();
        }
        assert_eq!(file.read_string().unwrap(), "a\nb\n");
        assert_eq!(file.read_bytes().unwrap(), b"a\nb\n");
    }
}
