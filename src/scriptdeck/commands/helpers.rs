use crate::card_store::CardStore;
use crate::config::ProjectConfig;
use crate::error::Result;
use crate::export::ExportMeta;
use crate::model::Card;
use crate::store::CardRepository;

/// Writes every dirty card in one `save_all`.
///
/// On failure the cards in `previous` are put back so the in-memory deck
/// matches what is still on disk, and the error is returned.
pub fn persist<R: CardRepository>(
    store: &mut CardStore,
    repo: &mut R,
    previous: Vec<Card>,
) -> Result<Vec<Card>> {
    let dirty = store.take_dirty();
    if dirty.is_empty() {
        return Ok(dirty);
    }

    match repo.save_all(&dirty) {
        Ok(()) => Ok(dirty),
        Err(e) => {
            tracing::warn!(error = %e, "persisting cards failed, restoring previous state");
            for card in previous {
                store.restore(card);
            }
            Err(e)
        }
    }
}

/// Title and author for document headers, with the title falling back to
/// the project directory name.
pub fn export_meta<R: CardRepository>(repo: &R, config: &ProjectConfig) -> ExportMeta {
    ExportMeta {
        title: config.title_or_dir_name(repo.root()),
        author: config.author(),
    }
}
