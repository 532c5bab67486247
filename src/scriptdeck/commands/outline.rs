use crate::card_store::CardStore;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::export::{render_outline, render_outline_with_status};

/// The outline as text. `with_status` adds written markers for display;
/// the plain form is identical to the outline export.
pub fn run(store: &CardStore, with_status: bool) -> Result<CmdResult> {
    let text = if with_status {
        render_outline_with_status(store.deck())
    } else {
        render_outline(store.deck())
    };
    Ok(CmdResult::default().with_text(text))
}
