use crate::commands::CmdResult;
use crate::error::Result;
use crate::vfs::Vfs;

/// Reads `path` through the virtual filesystem, decompressing `.gz`.
pub fn run(vfs: &Vfs, path: &str) -> Result<CmdResult> {
    let text = vfs.read_string(path)?;
    Ok(CmdResult::default().with_text(text))
}
