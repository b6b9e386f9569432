use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use std::path::Path;

pub fn run(registry: &StoreRegistry, path: &Path) -> Result<CmdResult> {
    let file = registry.open(path)?;
    let file = lock(&file)?;
    let names = file
        .document()
        .section_names()
        .map(|name| name.unwrap_or("").to_string())
        .collect();
    Ok(CmdResult::default().with_sections(names))
}
