use crate::commands::helpers::section_label;
use crate::commands::CmdResult;
use crate::document::Properties;
use crate::error::{IniError, Result};
use crate::store::{lock, StoreRegistry};
use std::path::Path;

pub fn run(registry: &StoreRegistry, path: &Path, section: &str, key: &str) -> Result<CmdResult> {
    let file = registry.open(path)?;
    let file = lock(&file)?;
    match file.document().section(section).get(key) {
        Some(value) => Ok(CmdResult::default().with_text(value)),
        None => Err(IniError::NotFound(format!(
            "{} is not set in {}",
            key,
            section_label(section)
        ))),
    }
}
