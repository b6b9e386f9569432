//! # Virtual Filesystem
//!
//! A [`Vfs`] resolves forward-slash paths to byte streams, whatever holds the
//! bytes: a local directory, an in-process [`ResourceBundle`], a tar archive,
//! or a union of other sources.
//!
//! ## Layering
//!
//! ```text
//! open_read(path)                       open_write(path)
//!   │                                     │
//!   ├─ backend.open_raw_read(norm)        ├─ alternative? ──► alternative.open_write
//!   │     ok ──► (gunzip if .gz)          │
//!   │     err ─► alternative.open_read    └─ backend.open_raw_write(norm)
//!   │             err ─► primary error          (gzip if .gz)
//! ```
//!
//! Every path is normalized with [`normalize_path`] before it reaches a
//! backend, so backends only ever see relative, `.`-free paths.
//!
//! ## Backends
//!
//! - [`local::LocalFs`]: a directory on disk
//! - [`archive::ArchiveFs`]: a `.tar`, `.tar.gz` or `.tgz` archive, scanned per read
//! - [`resource::ResourceBundle`]: read-only bytes compiled into the process
//! - [`union::UnionFs`]: first match across several sources
//! - [`resource::NullFs`]: always empty

use crate::document::Document;
use crate::error::{IniError, Result};
use crate::parser::parse_reader;
use crate::serializer;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fmt;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub mod archive;
pub mod file;
pub mod local;
pub mod resource;
pub mod union;

pub use archive::ArchiveFs;
pub use file::VFile;
pub use local::LocalFs;
pub use resource::{NullFs, ResourceBundle};
pub use union::UnionFs;

pub type VfsReader = Box<dyn Read + Send>;
pub type RawWriter = Box<dyn Write + Send>;

const GZIP_SUFFIX: &str = ".gz";

/// Collapses a path to its relative, normalized form.
///
/// Empty and `.` segments are dropped. Then, scanning from the end, each `..`
/// removes itself and the nearest preceding segment; a `..` met while
/// removing adds another segment to remove. `..` beyond the start is dropped.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let mut kept = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().rev();
    while let Some(segment) = iter.next() {
        if segment != ".." {
            kept.push(segment);
            continue;
        }
        let mut remove = 1usize;
        while remove > 0 {
            match iter.next() {
                Some("..") => remove += 1,
                Some(_) => remove -= 1,
                None => break,
            }
        }
    }
    kept.reverse();
    kept.join("/")
}

fn is_gzip(path: &str) -> bool {
    path.ends_with(GZIP_SUFFIX)
}

/// Maps an I/O error to `NotFound` when it is one, naming `what`.
pub(crate) fn io_error(e: io::Error, what: impl fmt::Display) -> IniError {
    if e.kind() == io::ErrorKind::NotFound {
        IniError::NotFound(what.to_string())
    } else {
        IniError::Io(e)
    }
}

/// A medium that can hand out raw byte streams for normalized paths.
pub trait Backend: Send + Sync + fmt::Display {
    fn open_raw_read(&self, path: &str) -> Result<VfsReader>;

    fn open_raw_write(&self, path: &str, _append: bool) -> Result<RawWriter> {
        Err(IniError::ReadOnly(format!("{} ({})", self, path)))
    }

    /// The on-disk location of `path`, when the medium has one.
    fn to_local_path(&self, _path: &str) -> Option<PathBuf> {
        None
    }

    /// Anything but a not-found error counts as existing.
    fn exists(&self, path: &str) -> bool {
        match self.open_raw_read(path) {
            Ok(_) => true,
            Err(e) => !e.is_not_found(),
        }
    }

    fn exists_and_writeable(&self, path: &str) -> bool {
        self.to_local_path(path)
            .and_then(|p| p.metadata().ok())
            .map(|m| !m.permissions().readonly())
            .unwrap_or(false)
    }
}

/// Writer returned by [`Vfs::open_write`]. Call [`finish`](VfsWriter::finish)
/// to flush everything, including the gzip trailer.
pub enum VfsWriter {
    Plain(RawWriter),
    Gzip(GzEncoder<RawWriter>),
}

impl VfsWriter {
    pub fn finish(self) -> Result<()> {
        match self {
            VfsWriter::Plain(mut w) => w.flush()?,
            VfsWriter::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for VfsWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            VfsWriter::Plain(w) => w.write(buf),
            VfsWriter::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            VfsWriter::Plain(w) => w.flush(),
            VfsWriter::Gzip(w) => w.flush(),
        }
    }
}

/// A source of files, optionally backed by an alternative output.
#[derive(Clone)]
pub struct Vfs {
    backend: Arc<dyn Backend>,
    alternative: Option<Arc<Vfs>>,
}

impl Vfs {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            alternative: None,
        }
    }

    pub fn null() -> Self {
        Self::new(NullFs)
    }

    /// The process working directory, resolved at each access.
    pub fn cwd() -> Self {
        Self::new(LocalFs::new("."))
    }

    pub fn local<P: Into<PathBuf>>(root: P) -> Self {
        Self::new(LocalFs::new(root))
    }

    /// A directory becomes a local source, a tar or zip archive an archive
    /// source, and anything else an empty source.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.is_dir() {
            return Self::local(path);
        }
        if ArchiveFs::is_archive_name(path) {
            return Self::new(ArchiveFs::from_path(path));
        }
        Self::null()
    }

    pub fn resources(bundle: ResourceBundle) -> Self {
        Self::new(bundle)
    }

    pub fn archive_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(ArchiveFs::from_bytes(bytes))
    }

    /// First match across `sources`, in order. A single source is returned as is.
    pub fn union(mut sources: Vec<Vfs>) -> Result<Self> {
        match sources.len() {
            0 => Err(IniError::Misuse("union of no sources".to_string())),
            1 => Ok(sources.remove(0)),
            _ => Ok(Self::new(UnionFs::new(sources))),
        }
    }

    /// Reads fall back to `alternative`; writes go only to it.
    pub fn with_alternative_output(mut self, alternative: Vfs) -> Self {
        self.alternative = Some(Arc::new(alternative));
        self
    }

    pub fn alternative_output(&self) -> Option<&Vfs> {
        self.alternative.as_deref()
    }

    pub(crate) fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn open_read(&self, path: &str) -> Result<VfsReader> {
        let normalized = normalize_path(path);
        match self.backend.open_raw_read(&normalized) {
            Ok(raw) if is_gzip(&normalized) => Ok(Box::new(GzDecoder::new(BufReader::new(raw)))),
            Ok(raw) => Ok(raw),
            Err(primary) => match &self.alternative {
                Some(alternative) => alternative.open_read(path).map_err(|_| primary),
                None => Err(primary),
            },
        }
    }

    pub fn open_write(&self, path: &str, append: bool) -> Result<VfsWriter> {
        if let Some(alternative) = &self.alternative {
            return alternative.open_write(path, append);
        }
        let normalized = normalize_path(path);
        if is_gzip(&normalized) {
            if append && self.backend.exists(&normalized) {
                return Err(IniError::Misuse(format!(
                    "Unable to append to gzip stream {}",
                    normalized
                )));
            }
            let raw = self.backend.open_raw_write(&normalized, false)?;
            return Ok(VfsWriter::Gzip(GzEncoder::new(raw, Compression::best())));
        }
        Ok(VfsWriter::Plain(self.backend.open_raw_write(&normalized, append)?))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.backend.exists(&normalize_path(path))
            || self.alternative.as_ref().is_some_and(|a| a.exists(path))
    }

    pub fn exists_and_writeable(&self, path: &str) -> bool {
        self.backend.exists_and_writeable(&normalize_path(path))
            || self
                .alternative
                .as_ref()
                .is_some_and(|a| a.exists_and_writeable(path))
    }

    pub fn local_path(&self, path: &str) -> Option<PathBuf> {
        self.backend
            .to_local_path(&normalize_path(path))
            .or_else(|| self.alternative.as_ref().and_then(|a| a.local_path(path)))
    }

    pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.open_read(path)?.read_to_end(&mut data)?;
        Ok(data)
    }

    pub fn read_string(&self, path: &str) -> Result<String> {
        let mut text = String::new();
        self.open_read(path)?.read_to_string(&mut text)?;
        Ok(text)
    }

    pub fn read_document(&self, path: &str) -> Result<Document> {
        parse_reader(BufReader::new(self.open_read(path)?))
    }

    pub fn write_bytes(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut writer = self.open_write(path, false)?;
        writer.write_all(data)?;
        writer.finish()
    }

    pub fn write_string(&self, path: &str, text: &str) -> Result<()> {
        self.write_bytes(path, text.as_bytes())
    }

    pub fn write_document(&self, path: &str, document: &Document) -> Result<()> {
        self.write_string(path, &serializer::to_string(document))
    }

    pub fn file(&self, path: &str) -> VFile {
        VFile::new(self.clone(), path)
    }
}

impl fmt::Display for Vfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.backend)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " (output: {})", alternative)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Vfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vfs").field(&self.to_string()).finish()
    }
}
