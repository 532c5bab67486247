//! # CLI Layer
//!
//! The terminal client for scriptdeck. It is one UI over [`scriptdeck::api`],
//! not the application itself.
//!
//! Only this layer:
//! - Parses arguments (clap)
//! - Writes to stdout/stderr and picks exit codes
//! - Launches `$EDITOR` and talks to the OS clipboard
//! - Knows about the per-user project registry
//!
//! Handlers call a single `ScriptApi` method, then hand the returned
//! `CmdResult` to `render`. Business rules stay in the command layer.

mod clipboard;
mod commands;
mod editor;
mod render;
mod setup;

pub use commands::run;
