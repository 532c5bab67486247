use super::CardRepository;
use crate::config::ProjectConfig;
use crate::error::{Result, ScriptError};
use crate::model::{Card, Deck, Position};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Repository that keeps every unit in memory. Exports still go to
/// `<root>/exports` on disk, so give it a real root when exporting.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    root: PathBuf,
    cards: BTreeMap<Position, Card>,
    config: ProjectConfig,
    fail_writes: bool,
    saves: usize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_deck(mut self, deck: &Deck) -> Self {
        for card in deck {
            if !card.is_empty() {
                self.cards.insert(card.position, card.clone());
            }
        }
        self
    }

    /// Makes every subsequent write fail with a storage error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of units written so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    fn check_writable(&self, position: Option<Position>) -> Result<()> {
        if self.fail_writes {
            let path = match position {
                Some(p) => self.card_path(p),
                None => self.root.clone(),
            };
            return Err(ScriptError::storage(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
            ));
        }
        Ok(())
    }
}

impl CardRepository for InMemoryRepository {
    fn load(&self) -> Result<Deck> {
        Ok(Deck::from_cards(self.cards.values().cloned()))
    }

    fn save(&mut self, card: &Card) -> Result<()> {
        self.save_all(std::slice::from_ref(card))
    }

    fn save_all(&mut self, cards: &[Card]) -> Result<()> {
        for card in cards {
            self.check_writable(Some(card.position))?;
        }
        for card in cards {
            self.cards.insert(card.position, card.clone());
            self.saves += 1;
        }
        Ok(())
    }

    fn ensure_layout(&mut self) -> Result<()> {
        self.check_writable(None)
    }

    fn load_config(&self) -> Result<ProjectConfig> {
        Ok(self.config.clone())
    }

    fn save_config(&mut self, config: &ProjectConfig) -> Result<()> {
        self.check_writable(None)?;
        self.config = config.clone();
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn card_path(&self, position: Position) -> PathBuf {
        self.root
            .join("cards")
            .join(format!("{:02}.md", position.get()))
    }

    fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }
}
