use colored::Colorize;
use inivault::api::{CmdMessage, ListedEntry, MessageLevel};
use inivault::config::VaultConfig;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_entries(entries: &[ListedEntry]) {
    for entry in entries {
        if let Some(comment) = &entry.comment {
            for line in comment.lines() {
                println!("{}", format!("# {}", line).dimmed());
            }
        }
        println!("{} = {}", entry.key.bold(), entry.value);
    }
}

pub(super) fn render_section_name(name: &str) -> String {
    if name.is_empty() {
        "(global)".to_string()
    } else {
        format!("[{}]", name)
    }
}

pub(super) fn print_sections(sections: &[String]) {
    if sections.is_empty() {
        println!("No sections.");
        return;
    }
    for name in sections {
        println!("{}", render_section_name(name).yellow());
    }
}

/// Prints text as is, adding a final newline when missing.
pub(super) fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

pub(super) fn print_config(config: &VaultConfig) {
    for key in VaultConfig::keys() {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_section_name() {
        assert_eq!(render_section_name(""), "(global)");
        assert_eq!(render_section_name("db"), "[db]");
    }
}
