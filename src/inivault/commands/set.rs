use crate::commands::helpers::{persist, section_label};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use std::path::Path;

pub fn run(
    registry: &StoreRegistry,
    path: &Path,
    section: &str,
    key: &str,
    value: &str,
    comment: Option<&str>,
) -> Result<CmdResult> {
    let file = registry.open(path)?;
    let mut file = lock(&file)?;
    let before = file.document().version();

    file.edit(|doc| {
        let target = doc.section_mut(section);
        match comment {
            Some(c) => target.set_with_comment(key, value, Some(c)),
            None => target.set(key, value),
        }
    })?;

    let mut result = CmdResult::default();
    if file.document().version() == before {
        result.add_message(CmdMessage::info(format!(
            "{} in {} already set to {}",
            key,
            section_label(section),
            value
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Set {} in {} to {}",
            key,
            section_label(section),
            value
        )));
    }
    persist(&mut file, &mut result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::sample_store;
    use crate::commands::MessageLevel;
    use std::fs;

    #[test]
    fn test_set_new_key_saves() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &path, "server", "tls", "on", Some("enable tls")).unwrap();
        assert!(res.saved);
        assert_eq!(res.messages[0].level, MessageLevel::Success);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("#enable tls\ntls=on\n"));
        assert!(text.contains("#listen port\nport=8080\n"));
    }

    #[test]
    fn test_set_same_value_does_not_write() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &path, "server", "port", "8080", None).unwrap();
        assert!(!res.saved);
        assert_eq!(res.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn test_set_keeps_existing_comment() {
        let (_dir, path, registry) = sample_store();
        run(&registry, &path, "server", "port", "9090", None).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("#listen port\nport=9090\n"));
    }
}
