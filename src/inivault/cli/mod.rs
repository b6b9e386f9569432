//! # CLI Layer
//!
//! One client of the inivault library, and the only code that touches the
//! terminal: it parses arguments, sets up logging, calls [`IniApi`] and
//! prints the returned `CmdResult`s.
//!
//! - `setup`: clap definitions
//! - `commands`: `run()` and one `handle_*` per subcommand
//! - `render`: printing
//!
//! [`IniApi`]: inivault::api::IniApi

mod commands;
mod render;
mod setup;

pub use commands::run;
