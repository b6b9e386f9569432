use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inivault", bin_name = "inivault", version)]
#[command(about = "Read, edit and format comment-preserving ini files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Section to operate on (empty for the global section)
    #[arg(short, long, global = true, default_value = "")]
    pub section: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value of a key
    Get {
        file: PathBuf,
        key: String,
    },

    /// Set a key, creating the file and section if needed
    Set {
        file: PathBuf,
        key: String,
        value: String,

        /// Comment written above the entry
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Remove a key, or the whole section when no key is given
    #[command(alias = "rm")]
    Unset { file: PathBuf, key: Option<String> },

    /// List the entries of a section
    #[command(alias = "ls")]
    List { file: PathBuf },

    /// List the sections of a file
    Sections { file: PathBuf },

    /// Append values to a section's unnamed list
    Push {
        file: PathBuf,

        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Copy entries from another ini file (looked up on the search path)
    Merge {
        file: PathBuf,
        source: String,

        /// Replace values that are already set
        #[arg(long)]
        overwrite: bool,
    },

    /// Print a file found on the search path
    Cat { path: String },

    /// Print a file in canonical form
    Fmt {
        path: String,

        /// Write the result back instead of printing it
        #[arg(short, long)]
        write: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (auto-save, search-path, write-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
