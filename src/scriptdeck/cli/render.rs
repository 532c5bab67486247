use colored::Colorize;
use scriptdeck::api::{CmdMessage, MessageLevel};
use scriptdeck::model::Card;
use scriptdeck::registry::ProjectEntry;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const INDEX_WIDTH: usize = 5;
const WRITTEN_MARKER: &str = "●";
const UNWRITTEN_MARKER: &str = "○";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// One line per card: position, written marker, title and a body preview.
pub(super) fn print_card_list(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }

    for card in cards {
        let index = format!("{:>width$}. ", card.position.get(), width = INDEX_WIDTH - 2);
        let marker = if card.is_written() {
            WRITTEN_MARKER.green()
        } else {
            UNWRITTEN_MARKER.dimmed()
        };

        let fixed = index.width() + WRITTEN_MARKER.width() + 1;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let line = truncate_to_width(&list_line(card), available);

        let title = if card.has_title() {
            line.normal()
        } else {
            line.dimmed()
        };
        println!("{}{} {}", index.yellow(), marker, title);
    }
}

pub(super) fn print_full_cards(cards: &[Card]) {
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!(
            "{} {}",
            format!("{}.", card.position).yellow(),
            card.display_title().bold()
        );
        println!("--------------------------------");
        println!("{}", card.body);
    }
}

pub(super) fn print_projects(entries: &[(&String, &ProjectEntry)], current: Option<&str>) {
    if entries.is_empty() {
        println!("No projects yet. Run `scriptdeck init` in a project directory.");
        return;
    }

    for (id, entry) in entries {
        let marker = if current == Some(id.as_str()) { "*" } else { " " };
        println!(
            "{} {}  {}  {}",
            marker.yellow(),
            id.bold(),
            entry.path.display(),
            entry
                .last_opened
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .dimmed()
        );
    }
}

/// Title followed by the first body text, flattened to one line.
fn list_line(card: &Card) -> String {
    let preview: String = card
        .body
        .chars()
        .take(LINE_WIDTH)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let preview = preview.trim();

    if preview.is_empty() {
        card.display_title().to_string()
    } else {
        format!("{}  {}", card.display_title(), preview)
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
