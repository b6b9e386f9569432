use crate::commands::helpers::persist;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{lock, StoreRegistry};
use crate::vfs::Vfs;
use std::path::Path;

/// Copies the document at `source` (resolved through `vfs`) into the store.
///
/// Without `overwrite` it only fills in what the store lacks, which is how
/// defaults are applied.
pub fn run(
    registry: &StoreRegistry,
    vfs: &Vfs,
    path: &Path,
    source: &str,
    overwrite: bool,
) -> Result<CmdResult> {
    let incoming = vfs.read_document(source)?;
    let file = registry.open(path)?;
    let mut file = lock(&file)?;

    let before = file.document().version();
    file.edit(|doc| doc.copy_from(&incoming, overwrite))?;

    let mut result = CmdResult::default();
    if file.document().version() == before {
        result.add_message(CmdMessage::info(format!(
            "{} already contains everything in {}",
            path.display(),
            source
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Merged {} into {}",
            source,
            path.display()
        )));
    }
    persist(&mut file, &mut result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::sample_store;
    use crate::document::Properties;
    use crate::vfs::ResourceBundle;

    fn defaults() -> Vfs {
        Vfs::resources(
            ResourceBundle::new("defaults")
                .with_file("defaults/app.ini", &b"[server]\nport=80\ntimeout=30\n"[..]),
        )
    }

    #[test]
    fn test_merge_fills_gaps_only() {
        let (_dir, path, registry) = sample_store();
        let res = run(&registry, &defaults(), &path, "app.ini", false).unwrap();
        assert!(res.saved);

        let file = registry.open(&path).unwrap();
        let file = lock(&file).unwrap();
        let server = file.document().section("server");
        assert_eq!(server.get("port"), Some("8080"));
        assert_eq!(server.get("timeout"), Some("30"));
    }

    #[test]
    fn test_merge_with_overwrite() {
        let (_dir, path, registry) = sample_store();
        run(&registry, &defaults(), &path, "app.ini", true).unwrap();
        let file = registry.open(&path).unwrap();
        assert_eq!(
            lock(&file).unwrap().document().section("server").get("port"),
            Some("80")
        );
    }

    #[test]
    fn test_merge_twice_is_a_no_op() {
        let (_dir, path, registry) = sample_store();
        run(&registry, &defaults(), &path, "app.ini", false).unwrap();
        let res = run(&registry, &defaults(), &path, "app.ini", false).unwrap();
        assert!(!res.saved);
    }

    #[test]
    fn test_merge_missing_source() {
        let (_dir, path, registry) = sample_store();
        let err = run(&registry, &defaults(), &path, "nope.ini", false).unwrap_err();
        assert!(err.is_not_found());
    }
}
