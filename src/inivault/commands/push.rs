use crate::commands::helpers::{persist, section_label};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use std::path::Path;

/// Appends `values` to the unnamed list of `section`.
pub fn run(
    registry: &StoreRegistry,
    path: &Path,
    section: &str,
    values: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if values.is_empty() {
        result.add_message(CmdMessage::warning("Nothing to append"));
        return Ok(result);
    }

    let file = registry.open(path)?;
    let mut file = lock(&file)?;
    let len = file.edit(|doc| {
        let mut list = doc.section_mut(section).unnamed_mut();
        list.extend(values);
        list.len()
    })?;

    result.add_message(CmdMessage::success(format!(
        "Appended {} to {} ({} elements)",
        values.len(),
        section_label(section),
        len
    )));
    persist(&mut file, &mut result)?;
    Ok(result)
}
