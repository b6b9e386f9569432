use crate::commands::helpers::section_label;
use crate::commands::{CmdMessage, CmdResult, ListedEntry};
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use std::path::Path;

pub fn run(registry: &StoreRegistry, path: &Path, section: &str) -> Result<CmdResult> {
    let file = registry.open(path)?;
    let file = lock(&file)?;

    let Some(found) = file.document().get_section(section) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "No {} in {}",
            section_label(section),
            path.display()
        )));
        return Ok(result);
    };

    let entries = found
        .entries()
        .map(|e| ListedEntry {
            key: e.key().to_string(),
            value: e.value().to_string(),
            comment: e.comment().map(str::to_string),
        })
        .collect();
    Ok(CmdResult::default().with_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::sample_store;

    #[test]
    fn test_list_section_entries_in_order() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &path, "server").unwrap();
        let keys: Vec<&str> = res.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["port", "host"]);
        assert_eq!(res.entries[0].comment.as_deref(), Some("listen port"));
    }

    #[test]
    fn test_list_shows_unnamed_bookkeeping() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &path, "paths").unwrap();
        let keys: Vec<&str> = res.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "count", "2"]);
    }

    #[test]
    fn test_list_missing_section_warns() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &path, "nothing").unwrap();
        assert!(res.entries.is_empty());
        assert_eq!(res.messages.len(), 1);
    }
}
