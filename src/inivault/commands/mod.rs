use crate::config::VaultConfig;

pub mod cat;
pub mod config;
pub mod fmt;
pub mod get;
pub mod helpers;
pub mod list;
pub mod merge;
pub mod push;
pub mod sections;
pub mod set;
pub mod unset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One entry as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub key: String,
    pub value: String,
    pub comment: Option<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub entries: Vec<ListedEntry>,
    /// Section names in document order; `""` is the global section.
    pub sections: Vec<String>,
    /// Raw text output (a value, a file, a formatted document).
    pub text: Option<String>,
    pub config: Option<VaultConfig>,
    /// Whether the command wrote its store back to disk.
    pub saved: bool,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_entries(mut self, entries: Vec<ListedEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_sections(mut self, sections: Vec<String>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_config(mut self, config: VaultConfig) -> Self {
        self.config = Some(config);
        self
    }
}
