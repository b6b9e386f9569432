//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI
//! clients. It owns the long-lived pieces a command needs:
//!
//! - a [`StoreRegistry`], so every command in a session sees one document per file
//! - the [`Vfs`] that `cat`, `fmt` and `merge` read through
//! - the config directory for `config`
//!
//! It dispatches and returns `Result<CmdResult>`. It never prints.

use crate::commands;
use crate::config::VaultConfig;
use crate::error::Result;
use crate::store::StoreRegistry;
use crate::vfs::Vfs;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, ListedEntry, MessageLevel};

pub struct IniApi {
    registry: StoreRegistry,
    vfs: Vfs,
    config_dir: PathBuf,
}

impl IniApi {
    pub fn new(registry: StoreRegistry, vfs: Vfs, config_dir: PathBuf) -> Self {
        Self {
            registry,
            vfs,
            config_dir,
        }
    }

    /// Builds the registry and filesystem described by `config`.
    pub fn from_config(config: &VaultConfig, config_dir: PathBuf) -> Result<Self> {
        let registry = StoreRegistry::new().with_auto_save(config.auto_save);
        Ok(Self::new(registry, build_vfs(config)?, config_dir))
    }

    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn get(&self, path: &Path, section: &str, key: &str) -> Result<CmdResult> {
        commands::get::run(&self.registry, path, section, key)
    }

    pub fn set(
        &self,
        path: &Path,
        section: &str,
        key: &str,
        value: &str,
        comment: Option<&str>,
    ) -> Result<CmdResult> {
        commands::set::run(&self.registry, path, section, key, value, comment)
    }

    pub fn unset(&self, path: &Path, section: &str, key: Option<&str>) -> Result<CmdResult> {
        commands::unset::run(&self.registry, path, section, key)
    }

    pub fn list(&self, path: &Path, section: &str) -> Result<CmdResult> {
        commands::list::run(&self.registry, path, section)
    }

    pub fn sections(&self, path: &Path) -> Result<CmdResult> {
        commands::sections::run(&self.registry, path)
    }

    pub fn push(&self, path: &Path, section: &str, values: &[String]) -> Result<CmdResult> {
        commands::push::run(&self.registry, path, section, values)
    }

    pub fn merge(&self, path: &Path, source: &str, overwrite: bool) -> Result<CmdResult> {
        commands::merge::run(&self.registry, &self.vfs, path, source, overwrite)
    }

    pub fn cat(&self, path: &str) -> Result<CmdResult> {
        commands::cat::run(&self.vfs, path)
    }

    pub fn fmt(&self, path: &str, write: bool) -> Result<CmdResult> {
        commands::fmt::run(&self.vfs, path, write)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }
}

/// The working directory, then each search path entry, with writes sent to
/// `write_dir` when set.
pub fn build_vfs(config: &VaultConfig) -> Result<Vfs> {
    let mut sources = vec![Vfs::cwd()];
    sources.extend(config.search_path.iter().map(Vfs::for_path));
    let vfs = Vfs::union(sources)?;
    Ok(match &config.write_dir {
        Some(dir) => vfs.with_alternative_output(Vfs::local(dir)),
        None => vfs,
    })
}
