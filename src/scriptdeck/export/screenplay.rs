use super::{trimmed_body, ExportMeta, Exporter};
use crate::model::{Card, Deck};

/// Markdown screenplay: one `##` section per authored card, in position order.
///
/// ```text
/// ## Opening Image
///
/// A sunrise over an empty field.
///
/// ## Card 12
///
/// Untitled cards are headed by their slot number.
/// ```
///
/// Cards with neither title nor body are skipped.
pub struct ScreenplayExporter;

impl ScreenplayExporter {
    fn heading(card: &Card) -> String {
        if card.has_title() {
            card.title.trim().to_string()
        } else {
            format!("Card {}", card.position)
        }
    }
}

impl Exporter for ScreenplayExporter {
    fn render(&self, deck: &Deck, _meta: &ExportMeta) -> String {
        let mut out = String::new();

        for card in deck.iter().filter(|c| !c.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("## ");
            out.push_str(&Self::heading(card));
            out.push('\n');

            if let Some(body) = trimmed_body(&card.body) {
                out.push('\n');
                out.push_str(body);
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Position;

    fn pos(n: usize) -> Position {
        Position::new(n).unwrap()
    }

    fn render(deck: &Deck) -> String {
        ScreenplayExporter.render(deck, &ExportMeta::default())
    }

    #[test]
    fn test_empty_deck_renders_nothing() {
        assert_eq!(render(&Deck::empty()), "");
    }

    #[test]
    fn test_single_section() {
        let deck = Deck::from_cards(vec![Card::new(
            pos(1),
            "Opening Image",
            "A sunrise over an empty field.",
        )]);
        assert_eq!(
            render(&deck),
            "## Opening Image\n\nA sunrise over an empty field.\n"
        );
    }

    #[test]
    fn test_untitled_card_uses_position() {
        let deck = Deck::from_cards(vec![Card::new(pos(12), "", "Something happens.")]);
        assert_eq!(render(&deck), "## Card 12\n\nSomething happens.\n");
    }

    #[test]
    fn test_title_only_card() {
        let deck = Deck::from_cards(vec![Card::new(pos(2), "Theme Stated", "")]);
        assert_eq!(render(&deck), "## Theme Stated\n");
    }

    #[test]
    fn test_sections_follow_position_order() {
        let deck = Deck::from_cards(vec![
            Card::new(pos(70), "Final Image", "Sunset."),
            Card::new(pos(1), "Opening Image", "Sunrise."),
        ]);
        assert_eq!(
            render(&deck),
            "## Opening Image\n\nSunrise.\n\n## Final Image\n\nSunset.\n"
        );
    }

    #[test]
    fn test_body_is_not_reflowed() {
        let body = "Line one\n  indented line two\n\nParagraph two";
        let deck = Deck::from_cards(vec![Card::new(pos(4), "Beat", body)]);
        assert!(render(&deck).contains(body));
    }

    #[test]
    fn test_deterministic() {
        let deck = Deck::from_cards(vec![Card::new(pos(9), "Nine", "body")]);
        assert_eq!(render(&deck), render(&deck.clone()));
    }
}
