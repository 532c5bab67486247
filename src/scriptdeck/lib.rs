//! # Scriptdeck Architecture
//!
//! Scriptdeck is a **UI-agnostic screenplay outlining library** built around a
//! fixed deck of 70 cards. The terminal client in `cli/` is one consumer of
//! it; everything it does goes through [`api::ScriptApi`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Argument parsing, colored output, $EDITOR, clipboard     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the open project: CardStore + repository + config   │
//! │  - Returns structured Result<CmdResult> values              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validate, mutate the CardStore, persist dirty cards      │
//! │  - Roll memory back when persistence fails                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Storage (store/)            │ │  Export (export/)          │
//! │  - CardRepository trait      │ │  - Exporter strategies     │
//! │  - FileRepository, InMemory  │ │  - coordinator writes file │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Slot Identity
//!
//! A card's position (1..=70) is its identity and never changes. Swapping two
//! cards exchanges their title and body; it does not renumber anything. See
//! [`model`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`card_store`]: In-memory deck with validation and dirty tracking
//! - [`store`]: Persistence, one text unit per card
//! - [`export`]: Screenplay, Fountain and outline exporters
//! - [`model`]: `Position`, `Card`, `Deck` and the card unit codec
//! - [`config`]: Per-project `project.json`
//! - [`registry`]: Per-user list of known projects
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod card_store;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod registry;
pub mod store;
