use crate::card_store::CardStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DECK_SIZE;

/// Lists all 70 cards, optionally only the ones with any content.
pub fn run(store: &CardStore, authored_only: bool) -> Result<CmdResult> {
    let deck = store.all();
    let cards: Vec<_> = deck
        .iter()
        .filter(|c| !authored_only || !c.is_empty())
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} of {} cards written",
        deck.written_count(),
        DECK_SIZE
    )));
    Ok(result.with_listed_cards(cards))
}
