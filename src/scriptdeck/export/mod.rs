//! # Exporters
//!
//! Every export format is a strategy behind the [`Exporter`] trait: an
//! ordered deck in, one document string out. Exporters are pure; the same
//! deck and metadata always render to byte-identical output, so no
//! timestamps or environment details ever land in a document.
//!
//! [`ExportFormat`] selects the strategy and the output filename, and
//! [`coordinator::export`] writes the rendered document to disk.

use crate::error::{Result, ScriptError};
use crate::model::Deck;
use std::fmt;
use std::str::FromStr;

pub mod coordinator;
pub mod fountain;
pub mod outline;
pub mod screenplay;

pub use coordinator::export;
pub use fountain::FountainExporter;
pub use outline::{render_outline, render_outline_with_status, OutlineExporter};
pub use screenplay::ScreenplayExporter;

/// Document-level details some formats put in front of the cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMeta {
    pub title: Option<String>,
    pub author: Option<String>,
}

pub trait Exporter {
    fn render(&self, deck: &Deck, meta: &ExportMeta) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Screenplay,
    Fountain,
    Outline,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::Screenplay,
        ExportFormat::Fountain,
        ExportFormat::Outline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Screenplay => "screenplay",
            ExportFormat::Fountain => "fountain",
            ExportFormat::Outline => "outline",
        }
    }

    pub fn exporter(self) -> &'static dyn Exporter {
        match self {
            ExportFormat::Screenplay => &ScreenplayExporter,
            ExportFormat::Fountain => &FountainExporter,
            ExportFormat::Outline => &OutlineExporter,
        }
    }

    /// `Screenplay.md`, `<Title>.fountain` or `<Title>-outline.txt`.
    pub fn file_name(self, title: Option<&str>) -> String {
        let stem = file_stem(title.unwrap_or(""));
        match self {
            ExportFormat::Screenplay => "Screenplay.md".to_string(),
            ExportFormat::Fountain => format!("{}.fountain", stem),
            ExportFormat::Outline => format!("{}-outline.txt", stem),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "screenplay" | "md" | "markdown" => Ok(ExportFormat::Screenplay),
            "fountain" => Ok(ExportFormat::Fountain),
            "outline" | "txt" => Ok(ExportFormat::Outline),
            other => Err(ScriptError::Api(format!(
                "Unknown export format '{}' (expected screenplay, fountain or outline)",
                other
            ))),
        }
    }
}

/// Renders the deck with the exporter for `format`.
pub fn render(format: ExportFormat, deck: &Deck, meta: &ExportMeta) -> String {
    format.exporter().render(deck, meta)
}

/// Turns a title into a filename stem: whitespace runs become `-`,
/// anything path-unsafe becomes `_`.
fn file_stem(title: &str) -> String {
    let stem = title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-");
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "Untitled".to_string()
    } else {
        stem.to_string()
    }
}

/// Body text with trailing line breaks dropped; everything else verbatim.
pub(crate) fn trimmed_body(body: &str) -> Option<&str> {
    let body = body.trim_end_matches(['\n', '\r']);
    if body.trim().is_empty() {
        None
    } else {
        Some(body)
    }
}
