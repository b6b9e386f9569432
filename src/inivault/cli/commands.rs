use super::render::{print_config, print_entries, print_messages, print_sections, print_text};
use super::setup::{Cli, Commands};
use clap::Parser;
use inivault::api::{ConfigAction, IniApi};
use inivault::config::VaultConfig;
use inivault::error::Result;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = VaultConfig::default_dir()?;
    let config = VaultConfig::load(&config_dir)?;
    let api = IniApi::from_config(&config, config_dir)?;
    let section = cli.section.as_str();

    let result = match cli.command {
        Commands::Get { file, key } => api.get(&file, section, &key)?,
        Commands::Set {
            file,
            key,
            value,
            comment,
        } => api.set(&file, section, &key, &value, comment.as_deref())?,
        Commands::Unset { file, key } => api.unset(&file, section, key.as_deref())?,
        Commands::List { file } => {
            let result = api.list(&file, section)?;
            print_entries(&result.entries);
            result
        }
        Commands::Sections { file } => {
            let result = api.sections(&file)?;
            print_sections(&result.sections);
            result
        }
        Commands::Push { file, values } => api.push(&file, section, &values)?,
        Commands::Merge {
            file,
            source,
            overwrite,
        } => api.merge(&file, &source, overwrite)?,
        Commands::Cat { path } => api.cat(&path)?,
        Commands::Fmt { path, write } => api.fmt(&path, write)?,
        Commands::Config { key, value } => {
            let show_all = key.is_none();
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(k), None) => ConfigAction::ShowKey(k),
                (Some(k), Some(v)) => ConfigAction::Set(k, v),
            };
            let result = api.config(action)?;
            if show_all {
                if let Some(config) = &result.config {
                    print_config(config);
                }
            }
            result
        }
    };

    if let Some(text) = &result.text {
        print_text(text);
    }
    print_messages(&result.messages);
    Ok(())
}

/// Logs go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let directive = if verbose { "inivault=debug" } else { "inivault=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
