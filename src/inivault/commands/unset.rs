use crate::commands::helpers::{persist, section_label};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use std::path::Path;

/// Removes `key`, or the whole section when `key` is `None`.
pub fn run(
    registry: &StoreRegistry,
    path: &Path,
    section: &str,
    key: Option<&str>,
) -> Result<CmdResult> {
    let file = registry.open(path)?;
    let mut file = lock(&file)?;
    let mut result = CmdResult::default();
    let label = section_label(section);

    match key {
        Some(key) => match file.remove(section, key)? {
            Some(old) => result.add_message(CmdMessage::success(format!(
                "Removed {} from {} (was {})",
                key, label, old
            ))),
            None => {
                result.add_message(CmdMessage::warning(format!(
                    "{} is not set in {}",
                    key, label
                )));
            }
        },
        None => {
            if file.remove_section(section)? {
                result.add_message(CmdMessage::success(format!("Removed {}", label)));
            } else {
                result.add_message(CmdMessage::warning(format!("No {} to remove", label)));
            }
        }
    }

    persist(&mut file, &mut result)?;
    Ok(result)
}
