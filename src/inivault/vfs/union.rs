use super::{Backend, RawWriter, Vfs, VfsReader};
use crate::error::{IniError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Ordered union: the first member that can serve a path wins.
///
/// Members are asked through their own backends, so a member's alternative
/// output takes part only in `exists` checks.
pub struct UnionFs {
    members: Vec<Vfs>,
}

impl UnionFs {
    pub fn new(members: Vec<Vfs>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Vfs] {
        &self.members
    }
}

impl Backend for UnionFs {
    /// Not-found only when every member says not-found; otherwise the first
    /// other error is reported.
    fn open_raw_read(&self, path: &str) -> Result<VfsReader> {
        let mut first_error = None;
        for member in &self.members {
            match member.backend().open_raw_read(path) {
                Ok(reader) => return Ok(reader),
                Err(e) if e.is_not_found() => {
                    debug!(member = %member, path, "not in union member");
                }
                Err(e) => {
                    debug!(member = %member, path, error = %e, "union member failed");
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| IniError::NotFound(format!("{} in {}", path, self))))
    }

    fn open_raw_write(&self, path: &str, append: bool) -> Result<RawWriter> {
        let mut first_error = None;
        for member in &self.members {
            match member.backend().open_raw_write(path, append) {
                Ok(writer) => return Ok(writer),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| IniError::ReadOnly(self.to_string())))
    }

    fn to_local_path(&self, path: &str) -> Option<PathBuf> {
        self.members.first().and_then(|m| m.local_path(path))
    }

    fn exists(&self, path: &str) -> bool {
        self.members.iter().any(|m| m.exists(path))
    }

    fn exists_and_writeable(&self, path: &str) -> bool {
        self.members.iter().any(|m| m.exists_and_writeable(path))
    }
}

impl fmt::Display for UnionFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("union:")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", member)?;
        }
        Ok(())
    }
}
