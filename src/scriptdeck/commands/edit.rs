use crate::card_store::CardStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CardRepository;

use super::helpers::persist;

/// Replaces a card's body wholesale.
pub fn set_body<R: CardRepository>(
    store: &mut CardStore,
    repo: &mut R,
    position: usize,
    text: &str,
) -> Result<CmdResult> {
    let previous = vec![store.get(position)?];
    store.set_body(position, text)?;
    let saved = persist(store, repo, previous)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Card {} saved", position)));
    Ok(result.with_affected_cards(saved))
}

/// Replaces title and body together, as one write. Used after a full-card
/// editor session. Nothing is written when neither changed.
pub fn update<R: CardRepository>(
    store: &mut CardStore,
    repo: &mut R,
    position: usize,
    title: &str,
    body: &str,
) -> Result<CmdResult> {
    let current = store.get(position)?;
    let mut result = CmdResult::default();

    if current.title == crate::model::normalize_title(title) && current.body == body {
        result.add_message(CmdMessage::info(format!("Card {} unchanged", position)));
        return Ok(result);
    }

    store.rename(position, title)?;
    store.set_body(position, body)?;
    let saved = persist(store, repo, vec![current])?;

    result.add_message(CmdMessage::success(format!("Card {} saved", position)));
    Ok(result.with_affected_cards(saved))
}
