use super::{render, ExportFormat, ExportMeta};
use crate::error::{Result, ScriptError};
use crate::model::Deck;
use std::fs;
use std::path::{Path, PathBuf};

/// Renders `deck` as `format` and writes it into `dest_dir`, replacing any
/// earlier export of the same name. Returns the written path.
pub fn export(
    deck: &Deck,
    format: ExportFormat,
    dest_dir: &Path,
    meta: &ExportMeta,
) -> Result<PathBuf> {
    let document = render(format, deck, meta);

    if !dest_dir.exists() {
        fs::create_dir_all(dest_dir).map_err(|e| ScriptError::storage(dest_dir, e))?;
    }

    let path = dest_dir.join(format.file_name(meta.title.as_deref()));
    fs::write(&path, &document).map_err(|e| ScriptError::storage(&path, e))?;

    tracing::info!(
        format = %format,
        path = %path.display(),
        bytes = document.len(),
        "exported deck"
    );
    Ok(path)
}
