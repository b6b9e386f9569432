use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::vfs::Vfs;

/// Parses `path` and re-serializes it in canonical form.
///
/// With `write`, the result replaces the file (or lands in the alternative
/// output, if one is configured); otherwise it is returned as text.
pub fn run(vfs: &Vfs, path: &str, write: bool) -> Result<CmdResult> {
    let original = vfs.read_string(path)?;
    let document = crate::parser::parse_str(&original);
    let formatted = document.to_string();

    if !write {
        return Ok(CmdResult::default().with_text(formatted));
    }

    let mut result = CmdResult::default();
    if formatted == original {
        result.add_message(CmdMessage::info(format!("{} is already formatted", path)));
        return Ok(result);
    }
    vfs.write_document(path, &document)?;
    result.saved = true;
    result.add_message(CmdMessage::success(format!("Formatted {}", path)));
    Ok(result)
}
