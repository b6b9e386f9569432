use super::CmdResult;
use crate::error::Result;
use crate::store::IniFile;

/// `[name]`, or `global section` for `""`.
pub fn section_label(name: &str) -> String {
    if name.is_empty() {
        "global section".to_string()
    } else {
        format!("[{}]", name)
    }
}

/// Writes `file` back if the command changed it.
pub fn persist(file: &mut IniFile, result: &mut CmdResult) -> Result<()> {
    if file.save_if_modified()? {
        result.saved = true;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::store::StoreRegistry;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub const SAMPLE: &str = "#sample\n\nname=demo\n\n[server]\n\n#listen port\nport=8080\nhost=localhost\n\n[paths]\n\n/etc\n/usr/share\n";

    /// A temp dir holding `app.ini` with [`SAMPLE`] content.
    pub fn sample_store() -> (TempDir, PathBuf, StoreRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, SAMPLE).unwrap();
        (dir, path, StoreRegistry::new())
    }
}
