//! # Card Store
//!
//! In-memory owner of the deck for the lifetime of an open project.
//!
//! Every mutation validates its positions first and only then touches the
//! deck, so a bad position never leaves a half-applied change. Mutated
//! positions are recorded as dirty until the caller persists them with
//! [`CardStore::take_dirty`].

use crate::error::Result;
use crate::model::{normalize_title, Card, Deck, Position};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct CardStore {
    deck: Deck,
    dirty: BTreeSet<Position>,
}

impl CardStore {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            dirty: BTreeSet::new(),
        }
    }

    pub fn get(&self, position: usize) -> Result<Card> {
        let position = Position::new(position)?;
        Ok(self.deck.get(position).clone())
    }

    pub fn rename(&mut self, position: usize, title: &str) -> Result<()> {
        let position = Position::new(position)?;
        self.deck.get_mut(position).title = normalize_title(title);
        self.dirty.insert(position);
        Ok(())
    }

    /// Exchanges title and body between two slots. Positions stay put.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let a = Position::new(a)?;
        let b = Position::new(b)?;
        if a == b {
            return Ok(());
        }
        self.deck.swap_content(a, b);
        self.dirty.insert(a);
        self.dirty.insert(b);
        Ok(())
    }

    /// Replaces the whole body; editors always submit full content.
    pub fn set_body(&mut self, position: usize, text: &str) -> Result<()> {
        let position = Position::new(position)?;
        self.deck.get_mut(position).body = text.to_string();
        self.dirty.insert(position);
        Ok(())
    }

    /// A snapshot of the deck in position order.
    pub fn all(&self) -> Deck {
        self.deck.clone()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Puts a previously captured card back in its slot and clears its dirty flag.
    pub fn restore(&mut self, card: Card) {
        let position = card.position;
        *self.deck.get_mut(position) = card;
        self.dirty.remove(&position);
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn dirty_positions(&self) -> Vec<Position> {
        self.dirty.iter().copied().collect()
    }

    /// Returns the dirty cards in position order and clears the dirty set.
    pub fn take_dirty(&mut self) -> Vec<Card> {
        let positions = std::mem::take(&mut self.dirty);
        positions
            .into_iter()
            .map(|p| self.deck.get(p).clone())
            .collect()
    }
}
