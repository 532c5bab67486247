use super::{ExportMeta, Exporter};
use crate::model::Deck;

const WRITTEN_MARKER: &str = "●";
const UNWRITTEN_MARKER: &str = "○";

/// One line per position, `N. Title`, always all 70 of them.
pub fn render_outline(deck: &Deck) -> String {
    let mut out = String::new();
    for card in deck {
        out.push_str(&format!("{}. {}\n", card.position, card.display_title()));
    }
    out
}

/// The outline with a written/unwritten marker per card, for on-screen display.
pub fn render_outline_with_status(deck: &Deck) -> String {
    let mut out = String::new();
    for card in deck {
        let marker = if card.is_written() {
            WRITTEN_MARKER
        } else {
            UNWRITTEN_MARKER
        };
        out.push_str(&format!(
            "{}. {} {}\n",
            card.position,
            marker,
            card.display_title()
        ));
    }
    out
}

/// Structural overview export. Unlike the other formats it lists every
/// position, empty or not.
pub struct OutlineExporter;

impl Exporter for OutlineExporter {
    fn render(&self, deck: &Deck, _meta: &ExportMeta) -> String {
        render_outline(deck)
    }
}
