use super::{io_error, is_gzip, Backend, RawWriter, VfsReader};
use crate::error::Result;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Files under a directory on disk.
#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        full.extend(path.split('/').filter(|s| !s.is_empty()));
        full
    }
}

impl Backend for LocalFs {
    fn open_raw_read(&self, path: &str) -> Result<VfsReader> {
        let full = self.resolve(path);
        let file = File::open(&full).map_err(|e| io_error(e, full.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }

    /// Missing parent directories are created.
    fn open_raw_write(&self, path: &str, append: bool) -> Result<RawWriter> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(&full)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn to_local_path(&self, path: &str) -> Option<PathBuf> {
        Some(self.resolve(path))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    /// Compressed files are never reported writeable in place.
    fn exists_and_writeable(&self, path: &str) -> bool {
        if is_gzip(path) {
            return false;
        }
        fs::metadata(self.resolve(path))
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }
}

impl fmt::Display for LocalFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parents_and_reads_back() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new(dir.path());
        let mut w = fs.open_raw_write("a/b/c.txt", false).unwrap();
        w.write_all(b"data").unwrap();
        w.flush().unwrap();
        drop(w);

        let mut text = String::new();
        fs.open_raw_read("a/b/c.txt")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "data");
        assert_eq!(fs.to_local_path("a/b/c.txt"), Some(dir.path().join("a/b/c.txt")));
    }

    #[test]
    fn test_append_mode() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new(dir.path());
        for chunk in ["one", "two"] {
            let mut w = fs.open_raw_write("log.txt", true).unwrap();
            w.write_all(chunk.as_bytes()).unwrap();
            w.flush().unwrap();
        }
        assert_eq!(
            std::fs::read_to_string(dir.path().join("log.txt")).unwrap(),
            "onetwo"
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFs::new(dir.path()).open_raw_read("nope").err().unwrap();
        assert!(err.is_not_found());
        assert!(!LocalFs::new(dir.path()).exists("nope"));
    }
}
