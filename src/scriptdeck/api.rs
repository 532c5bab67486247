//! # API Facade
//!
//! `ScriptApi` is the single entry point for every UI. It owns the open
//! project (card store, repository, project config) and dispatches each
//! operation to its command module.
//!
//! The API:
//! - **Dispatches** to `commands::*`
//! - **Persists** through the repository as part of each mutating command
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints, never touches the clipboard and never exits the process.
//!
//! ## Generic Over CardRepository
//!
//! - Production: `ScriptApi<FileRepository>`
//! - Testing: `ScriptApi<InMemoryRepository>`

use crate::card_store::CardStore;
use crate::commands;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::model::{Deck, Position};
use crate::store::CardRepository;
use std::path::PathBuf;

pub struct ScriptApi<R: CardRepository> {
    store: CardStore,
    repo: R,
    config: ProjectConfig,
}

impl<R: CardRepository> ScriptApi<R> {
    /// Loads the deck and project config from `repo`.
    pub fn open(repo: R) -> Result<Self> {
        let deck = repo.load()?;
        let config = repo.load_config()?;
        tracing::info!(
            root = %repo.root().display(),
            written = deck.written_count(),
            "opened project"
        );
        Ok(Self {
            store: CardStore::new(deck),
            repo,
            config,
        })
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<commands::CmdResult> {
        commands::swap::run(&mut self.store, &mut self.repo, a, b)
    }

    pub fn rename(&mut self, position: usize, title: &str) -> Result<commands::CmdResult> {
        commands::rename::run(&mut self.store, &mut self.repo, position, title)
    }

    pub fn set_body(&mut self, position: usize, text: &str) -> Result<commands::CmdResult> {
        commands::edit::set_body(&mut self.store, &mut self.repo, position, text)
    }

    pub fn update_card(
        &mut self,
        position: usize,
        title: &str,
        body: &str,
    ) -> Result<commands::CmdResult> {
        commands::edit::update(&mut self.store, &mut self.repo, position, title, body)
    }

    pub fn view(&self, positions: &[usize]) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, positions)
    }

    pub fn list(&self, authored_only: bool) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, authored_only)
    }

    pub fn outline(&self, with_status: bool) -> Result<commands::CmdResult> {
        commands::outline::run(&self.store, with_status)
    }

    /// The plain outline text, as exported.
    pub fn get_outline(&self) -> String {
        crate::export::render_outline(self.store.deck())
    }

    pub fn export(&self, format: ExportFormat) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, &self.repo, &self.config, format)
    }

    pub fn init(
        &mut self,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.repo, &mut self.config, title, author)
    }

    pub fn card_path(&self, position: usize) -> Result<PathBuf> {
        Ok(self.repo.card_path(Position::new(position)?))
    }

    /// A snapshot of the current deck.
    pub fn deck(&self) -> Deck {
        self.store.all()
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Title used in export headers and filenames.
    pub fn project_title(&self) -> Option<String> {
        self.config.title_or_dir_name(self.repo.root())
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
