use scriptdeck::error::{Result, ScriptError};
use scriptdeck::model::{decode_unit, encode_unit, Card};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

/// Gets the editor command from the environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(ScriptError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor(path: &Path) -> Result<String> {
    let editor = get_editor()?;
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ScriptError::Api("Empty editor command".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| ScriptError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(ScriptError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(|e| ScriptError::storage(path, e))
}

/// Edits a whole card as its text unit (`# Title`, blank line, body) and
/// returns the card parsed back from the saved buffer.
pub fn edit_card(card: &Card) -> Result<Card> {
    let temp_file = env::temp_dir().join(format!(
        "scriptdeck-{:02}-{}.md",
        card.position.get(),
        Uuid::new_v4()
    ));
    fs::write(&temp_file, encode_unit(card)).map_err(|e| ScriptError::storage(&temp_file, e))?;

    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(decode_unit(card.position, &edited?))
}
