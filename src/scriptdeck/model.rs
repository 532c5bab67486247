//! # Deck Model
//!
//! A project is a fixed deck of [`DECK_SIZE`] cards. Every card lives in a
//! slot identified by its [`Position`]; positions never move. Reordering the
//! story means moving *content* between slots (see `CardStore::swap`), so a
//! position is slot identity, not content identity.
//!
//! This module also owns the on-disk card unit codec ([`encode_unit`] /
//! [`decode_unit`]):
//!
//! ```text
//! # Opening Image        <- header line, only when the card has a title
//!                        <- one blank separator line
//! A sunrise over an...   <- body, verbatim
//! ```
//!
//! An untitled card is stored as its bare body. The one exception is a body
//! that itself starts with `#`: it gets an empty `#` header so the first body
//! line can't be mistaken for a title.

use crate::error::{Result, ScriptError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cards in every deck.
pub const DECK_SIZE: usize = 70;

/// Label shown for cards without a title.
pub const UNTITLED: &str = "Untitled";

/// A validated slot number in `1..=DECK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(usize);

impl Position {
    pub fn new(position: usize) -> Result<Self> {
        if (1..=DECK_SIZE).contains(&position) {
            Ok(Self(position))
        } else {
            Err(ScriptError::OutOfRange { position })
        }
    }

    /// The 1-based slot number.
    pub fn get(self) -> usize {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 - 1
    }

    /// All positions in ascending order.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=DECK_SIZE).map(Position)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Position {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self> {
        let n: usize = s
            .trim()
            .parse()
            .map_err(|_| ScriptError::Api(format!("Invalid card number: {}", s)))?;
        Position::new(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub position: Position,
    pub title: String,
    pub body: String,
}

impl Card {
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            title: String::new(),
            body: String::new(),
        }
    }

    pub fn new(position: Position, title: &str, body: impl Into<String>) -> Self {
        Self {
            position,
            title: normalize_title(title),
            body: body.into(),
        }
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// A card counts as written once its body holds any text.
    pub fn is_written(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Neither a title nor any body text.
    pub fn is_empty(&self) -> bool {
        !self.has_title() && !self.is_written()
    }

    /// The title, or "Untitled".
    pub fn display_title(&self) -> &str {
        if self.has_title() {
            self.title.trim()
        } else {
            UNTITLED
        }
    }
}

/// Titles are single-line: line breaks collapse to spaces and the ends are trimmed.
pub fn normalize_title(title: &str) -> String {
    title
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The full set of cards, always exactly [`DECK_SIZE`] long and in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn empty() -> Self {
        Self {
            cards: Position::all().map(Card::empty).collect(),
        }
    }

    /// Builds a deck from any subset of cards; unmentioned slots stay empty.
    /// A later card for the same position replaces an earlier one.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut deck = Self::empty();
        for card in cards {
            let idx = card.position.index();
            deck.cards[idx] = card;
        }
        deck
    }

    pub fn get(&self, position: Position) -> &Card {
        &self.cards[position.index()]
    }

    pub(crate) fn get_mut(&mut self, position: Position) -> &mut Card {
        &mut self.cards[position.index()]
    }

    pub(crate) fn swap_content(&mut self, a: Position, b: Position) {
        self.cards.swap(a.index(), b.index());
        self.cards[a.index()].position = a;
        self.cards[b.index()].position = b;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; a deck is never short of cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// True when no card has a title or any body text.
    pub fn is_blank(&self) -> bool {
        self.cards.iter().all(Card::is_empty)
    }

    pub fn written_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_written()).count()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Serializes a card to its on-disk text unit.
pub fn encode_unit(card: &Card) -> String {
    let title = normalize_title(&card.title);
    if !title.is_empty() {
        format!("# {}\n\n{}", title, card.body)
    } else if card.body.starts_with('#') {
        format!("#\n\n{}", card.body)
    } else {
        card.body.clone()
    }
}

/// Parses a text unit back into the card at `position`.
///
/// Never fails: any text is a valid unit. Files written by hand without the
/// blank separator line are accepted too.
pub fn decode_unit(position: Position, raw: &str) -> Card {
    if !raw.starts_with('#') {
        return Card {
            position,
            title: String::new(),
            body: raw.to_string(),
        };
    }

    let (header, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    let body = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
        .unwrap_or(rest);

    Card {
        position,
        title: normalize_title(&header[1..]),
        body: body.to_string(),
    }
}
