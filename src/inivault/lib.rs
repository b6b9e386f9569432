//! # Inivault Architecture
//!
//! Inivault is an **ini document engine**: a lossless document model for a
//! comment-preserving ini dialect, a store that keeps one document per file
//! and saves it atomically, and a virtual filesystem to read documents from
//! directories, bundled resources and archives alike. The `inivault` binary
//! is one client of the library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs) + Commands (commands/*.rs)                    │
//! │  - One function per operation, returns Result<CmdResult>    │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Store (store/)              │ │  Virtual FS (vfs/)         │
//! │  - Registry, one per path    │ │  - local, archive, bundle  │
//! │  - Atomic save, auto-save    │ │  - union, alternative out  │
//! └──────────────────────────────┘ └────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document (document/) ◄── parser.rs / serializer.rs         │
//! │  - Sections, entries, comments, unnamed lists, versions     │
//! │  - codec.rs: the escaping used on every name, key, value    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The text format
//!
//! ```text
//! #header comment of the global section
//!
//! title=Example
//!
//! #header comment of [paths]
//! [paths]
//!
//! /etc/app
//! /usr/share/app
//! #comment of mode
//! mode=strict
//! ```
//!
//! Bare lines form the section's *unnamed list*, stored as entries `1`,
//! `2`, ... plus a `count` entry. See [`codec`] for how names, keys and
//! values are escaped.
//!
//! ## Module Overview
//!
//! - [`document`]: the document model and the [`document::Properties`] lookup trait
//! - [`codec`]: escaping and unescaping
//! - [`parser`] / [`serializer`]: text to document and back
//! - [`store`]: file-backed documents and the [`store::StoreRegistry`]
//! - [`vfs`]: the virtual filesystem
//! - [`commands`] / [`api`]: operations used by the CLI
//! - [`config`]: the tool's own settings
//! - [`error`]: error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod store;
pub mod vfs;
