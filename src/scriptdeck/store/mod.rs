//! # Storage Layer
//!
//! The [`CardRepository`] trait persists a deck one card at a time and loads
//! it back as a whole.
//!
//! ## Implementations
//!
//! - [`fs::FileRepository`]: production storage under a project directory
//! - [`memory::InMemoryRepository`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! ```text
//! <root>/
//! ├── project.json     # ProjectConfig (title, author)
//! ├── cards/
//! │   ├── 01.md        # one unit per position, see model::encode_unit
//! │   └── ...
//! └── exports/         # export output
//! ```
//!
//! Loading is total over the 70 positions: a missing unit is an empty card,
//! never an error. Only unreadable units fail.

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::model::{Card, Deck, Position};
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

pub trait CardRepository {
    /// Load all 70 cards, defaulting missing units to empty cards
    fn load(&self) -> Result<Deck>;

    /// Persist a single card
    fn save(&mut self, card: &Card) -> Result<()>;

    /// Persist several cards as one unit of work.
    ///
    /// Implementations should make either all or none of the cards visible
    /// where the backend allows it.
    fn save_all(&mut self, cards: &[Card]) -> Result<()> {
        for card in cards {
            self.save(card)?;
        }
        Ok(())
    }

    /// Create the project layout if it doesn't exist yet
    fn ensure_layout(&mut self) -> Result<()>;

    fn load_config(&self) -> Result<ProjectConfig>;

    fn save_config(&mut self, config: &ProjectConfig) -> Result<()>;

    fn root(&self) -> &Path;

    /// Where a card's unit lives (or would live)
    fn card_path(&self, position: Position) -> PathBuf;

    fn exports_dir(&self) -> PathBuf;
}
