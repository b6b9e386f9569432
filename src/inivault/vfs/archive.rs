use super::{io_error, normalize_path, Backend, VfsReader};
use crate::error::{IniError, Result};
use flate2::read::GzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZIP_ENTRY_MAGIC: &[u8] = b"PK\x03\x04";
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
const ARCHIVE_SUFFIXES: [&str; 4] = [".tar", ".tar.gz", ".tgz", ".zip"];

enum Stream {
    Tar(Box<dyn Read>),
    Zip(Box<dyn Read>),
}

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// Read-only view of a zip archive or a tar archive, optionally
/// gzip-compressed. The format is picked from the leading bytes.
///
/// No index is kept: each read opens the archive and scans entries from the
/// start until one whose normalized name matches. The entry is buffered in
/// memory and the archive closed before the read returns.
#[derive(Debug, Clone)]
pub struct ArchiveFs {
    source: Source,
}

impl ArchiveFs {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            source: Source::Bytes(bytes.into()),
        }
    }

    pub fn is_archive_name(path: &Path) -> bool {
        let name = path.to_string_lossy();
        ARCHIVE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    }

    fn open_stream(&self) -> Result<Stream> {
        let inner: Box<dyn Read> = match &self.source {
            Source::Path(path) => {
                Box::new(File::open(path).map_err(|e| io_error(e, path.display()))?)
            }
            Source::Bytes(bytes) => Box::new(Cursor::new(Arc::clone(bytes))),
        };
        let mut reader = BufReader::new(inner);
        let head = reader.fill_buf()?;
        if head.starts_with(&GZIP_MAGIC) {
            Ok(Stream::Tar(Box::new(GzDecoder::new(reader))))
        } else if head.starts_with(ZIP_ENTRY_MAGIC) || head.starts_with(ZIP_EMPTY_MAGIC) {
            Ok(Stream::Zip(Box::new(reader)))
        } else {
            Ok(Stream::Tar(Box::new(reader)))
        }
    }

    fn find_in_tar(&self, reader: Box<dyn Read>, wanted: &str) -> Result<Option<Vec<u8>>> {
        let mut archive = tar::Archive::new(reader);
        let mut scanned = 0usize;
        for entry in archive.entries()? {
            let mut entry = entry?;
            scanned += 1;
            let name = entry.path()?.to_string_lossy().replace('\\', "/");
            if normalize_path(&name) != wanted {
                continue;
            }
            // The header size is not trusted for preallocation.
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            debug!(archive = %self, entry = %wanted, scanned, "tar entry found");
            return Ok(Some(data));
        }
        debug!(archive = %self, entry = %wanted, scanned, "tar entry missing");
        Ok(None)
    }

    fn find_in_zip(&self, mut reader: Box<dyn Read>, wanted: &str) -> Result<Option<Vec<u8>>> {
        let mut scanned = 0usize;
        while let Some(mut file) = zip::read::read_zipfile_from_stream(&mut reader)? {
            scanned += 1;
            if normalize_path(&file.name().replace('\\', "/")) != wanted {
                continue;
            }
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            debug!(archive = %self, entry = %wanted, scanned, "zip entry found");
            return Ok(Some(data));
        }
        debug!(archive = %self, entry = %wanted, scanned, "zip entry missing");
        Ok(None)
    }
}

impl Backend for ArchiveFs {
    fn open_raw_read(&self, path: &str) -> Result<VfsReader> {
        let wanted = normalize_path(path);
        if wanted.is_empty() {
            return Err(IniError::NotFound(format!("empty path in {}", self)));
        }

        let found = match self.open_stream()? {
            Stream::Tar(reader) => self.find_in_tar(reader, &wanted)?,
            Stream::Zip(reader) => self.find_in_zip(reader, &wanted)?,
        };
        match found {
            Some(data) => Ok(Box::new(Cursor::new(data))),
            None => Err(IniError::NotFound(format!("{} not found in {}", wanted, self))),
        }
    }
}

impl fmt::Display for ArchiveFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Bytes(bytes) => write!(f, "archive:<{} bytes>", bytes.len()),
        }
    }
}
