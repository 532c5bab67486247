use crate::card_store::CardStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::export::{self, ExportFormat};
use crate::store::CardRepository;

use super::helpers::export_meta;

/// Exports the current deck into the project's export directory.
pub fn run<R: CardRepository>(
    store: &CardStore,
    repo: &R,
    config: &ProjectConfig,
    format: ExportFormat,
) -> Result<CmdResult> {
    let meta = export_meta(repo, config);
    let path = export::export(store.deck(), format, &repo.exports_dir(), &meta)?;

    let mut result = CmdResult::default();
    if format != ExportFormat::Outline && store.deck().is_blank() {
        result.add_message(CmdMessage::warning(
            "No card has any content yet; the export is empty.",
        ));
    }
    result.add_message(CmdMessage::success(format!(
        "Exported {} to {}",
        format,
        path.display()
    )));
    Ok(result.with_export_path(path))
}
