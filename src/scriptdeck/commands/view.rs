use crate::card_store::CardStore;
use crate::commands::CmdResult;
use crate::error::Result;

pub fn run(store: &CardStore, positions: &[usize]) -> Result<CmdResult> {
    let cards = positions
        .iter()
        .map(|&p| store.get(p))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_cards(cards))
}
