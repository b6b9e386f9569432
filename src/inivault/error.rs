use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IniError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed value for {key}: \"{value}\" ({reason})")]
    Malformed {
        key: String,
        value: String,
        reason: String,
    },

    /// Save failed. `content` is the full serialized document so nothing is lost.
    #[error("Unable to save {} (data: \"{content}\"): {source}", .path.display())]
    Persistence {
        path: PathBuf,
        content: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Misuse: {0}")]
    Misuse(String),

    #[error("Attempt to write read only filesystem: {0}")]
    ReadOnly(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl IniError {
    /// True for missing files, entries and resources, whichever layer reported them.
    pub fn is_not_found(&self) -> bool {
        match self {
            IniError::NotFound(_) => true,
            IniError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            IniError::Archive(zip::result::ZipError::Io(e)) => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// The serialized document carried by a failed save.
    pub fn recovered_content(&self) -> Option<&str> {
        match self {
            IniError::Persistence { content, .. } => Some(content),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IniError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_classification() {
        assert!(IniError::NotFound("a".into()).is_not_found());
        assert!(IniError::Io(io::Error::new(io::ErrorKind::NotFound, "x")).is_not_found());
        assert!(!IniError::Io(io::Error::other("x")).is_not_found());
        assert!(!IniError::Misuse("x".into()).is_not_found());
    }

    #[test]
    fn test_persistence_error_embeds_content() {
        let err = IniError::Persistence {
            path: PathBuf::from("conf.ini"),
            content: "key=value\n".into(),
            source: io::Error::other("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("key=value"));
        assert!(msg.contains("conf.ini"));
        assert_eq!(err.recovered_content(), Some("key=value\n"));
    }
}
