use crate::card_store::CardStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CardRepository;

use super::helpers::persist;

/// Sets the title of a card. An empty title clears it.
pub fn run<R: CardRepository>(
    store: &mut CardStore,
    repo: &mut R,
    position: usize,
    title: &str,
) -> Result<CmdResult> {
    let previous = vec![store.get(position)?];
    store.rename(position, title)?;
    let saved = persist(store, repo, previous)?;

    let mut result = CmdResult::default();
    let message = match saved.first() {
        Some(card) if card.has_title() => {
            format!("Card {} renamed: {}", position, card.display_title())
        }
        _ => format!("Card {} is now untitled", position),
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_cards(saved))
}
