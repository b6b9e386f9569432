use crate::commands::{CmdMessage, CmdResult};
use crate::config::VaultConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = VaultConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = VaultConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = VaultConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.saved = true;
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn test_show_all_defaults() {
        let dir = tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(res.config, Some(VaultConfig::default()));
    }

    #[test]
    fn test_set_then_show_key() {
        let dir = tempdir().unwrap();
        let res = run(
            dir.path(),
            ConfigAction::Set("auto-save".into(), "on".into()),
        )
        .unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Success);
        assert_eq!(res.messages[0].content, "auto-save set to true");

        let res = run(dir.path(), ConfigAction::ShowKey("auto-save".into())).unwrap();
        assert_eq!(res.messages[0].content, "true");
    }

    #[test]
    fn test_unknown_key_reports_error_message() {
        let dir = tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowKey("nope".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);

        let res = run(dir.path(), ConfigAction::Set("nope".into(), "x".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }
}
