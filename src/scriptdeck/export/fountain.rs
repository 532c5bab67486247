use super::{trimmed_body, ExportMeta, Exporter};
use crate::model::{Card, Deck};

/// Fountain's recognised scene heading openers. Longer prefixes come first so
/// `INT./EXT.` isn't read as `INT.`.
const SCENE_PREFIXES: [&str; 6] = ["INT./EXT", "INT/EXT", "I/E", "INT", "EXT", "EST"];

/// Fountain screenplay.
///
/// A title page block (`Title:`/`Author:`) comes first when metadata is
/// available, then every authored card as a scene heading followed by its
/// body. Headings are the uppercased card title; a title that doesn't open
/// with a standard prefix (`INT.`, `EXT.`, ...) is forced with a leading `.`.
/// Bodies pass through untouched apart from trailing line breaks.
pub struct FountainExporter;

impl FountainExporter {
    fn title_page(meta: &ExportMeta) -> String {
        let mut page = String::new();
        if let Some(title) = meta.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            page.push_str(&format!("Title: {}\n", title));
        }
        if let Some(author) = meta
            .author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
        {
            page.push_str(&format!("Author: {}\n", author));
        }
        page
    }

    pub(crate) fn scene_heading(card: &Card) -> String {
        if !card.has_title() {
            return format!(".CARD {}", card.position);
        }

        let heading = card.title.trim().to_uppercase();
        if is_scene_heading(&heading) || is_forced(&heading) {
            heading
        } else if heading.starts_with(char::is_alphanumeric) {
            format!(".{}", heading)
        } else {
            // `.` must be followed by an alphanumeric to force a heading
            format!(".CARD {} - {}", card.position, heading)
        }
    }
}

fn is_scene_heading(line: &str) -> bool {
    SCENE_PREFIXES.iter().any(|prefix| {
        line.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with(' '))
    })
}

fn is_forced(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('.') && chars.next().is_some_and(char::is_alphanumeric)
}

impl Exporter for FountainExporter {
    fn render(&self, deck: &Deck, meta: &ExportMeta) -> String {
        let mut out = Self::title_page(meta);

        for card in deck.iter().filter(|c| !c.is_empty()) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&Self::scene_heading(card));
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
