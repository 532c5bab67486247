use crate::card_store::CardStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CardRepository;

use super::helpers::persist;

pub fn run<R: CardRepository>(
    store: &mut CardStore,
    repo: &mut R,
    a: usize,
    b: usize,
) -> Result<CmdResult> {
    let previous = vec![store.get(a)?, store.get(b)?];
    store.swap(a, b)?;

    let mut result = CmdResult::default();
    if a == b {
        result.add_message(CmdMessage::info(format!(
            "Card {} swapped with itself, nothing to do.",
            a
        )));
        return Ok(result);
    }

    let saved = persist(store, repo, previous)?;
    result.add_message(CmdMessage::success(format!(
        "Swapped cards {} and {}",
        a, b
    )));
    Ok(result.with_affected_cards(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{edit, rename};
    use crate::error::ScriptError;
    use crate::model::Position;
    use crate::store::memory::InMemoryRepository;

    fn setup() -> (CardStore, InMemoryRepository) {
        let mut store = CardStore::default();
        let mut repo = InMemoryRepository::new();
        rename::run(&mut store, &mut repo, 1, "Opening Image").unwrap();
        edit::set_body(&mut store, &mut repo, 1, "A sunrise over an empty field.").unwrap();
        (store, repo)
    }

    #[test]
    fn test_swap_persists_both_cards() {
        let (mut store, mut repo) = setup();
        let result = run(&mut store, &mut repo, 1, 70).unwrap();
        assert_eq!(result.affected_cards.len(), 2);

        let on_disk = repo.load().unwrap();
        assert!(on_disk.get(Position::new(1).unwrap()).is_empty());
        assert_eq!(
            on_disk.get(Position::new(70).unwrap()).title,
            "Opening Image"
        );
    }

    #[test]
    fn test_swap_self_writes_nothing() {
        let (mut store, mut repo) = setup();
        let before = repo.save_count();
        let result = run(&mut store, &mut repo, 3, 3).unwrap();
        assert!(result.affected_cards.is_empty());
        assert_eq!(repo.save_count(), before);
    }

    #[test]
    fn test_swap_out_of_range() {
        let (mut store, mut repo) = setup();
        let err = run(&mut store, &mut repo, 1, 71).unwrap_err();
        assert!(matches!(err, ScriptError::OutOfRange { position: 71 }));
        assert_eq!(store.get(1).unwrap().title, "Opening Image");
    }

    #[test]
    fn test_failed_swap_keeps_memory_in_sync() {
        let (mut store, mut repo) = setup();
        repo.fail_writes(true);

        assert!(run(&mut store, &mut repo, 1, 2).is_err());
        assert_eq!(store.get(1).unwrap().title, "Opening Image");
        assert!(store.get(2).unwrap().is_empty());
    }

    #[test]
    fn test_failed_swap_on_disk_keeps_both_units() {
        use crate::store::fs::FileRepository;
        use std::fs;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        let mut store = CardStore::default();
        rename::run(&mut store, &mut repo, 1, "Opening Image").unwrap();
        edit::set_body(&mut store, &mut repo, 1, "A sunrise over an empty field.").unwrap();
        fs::create_dir_all(repo.card_path(Position::new(70).unwrap()).join("keep")).unwrap();

        assert!(run(&mut store, &mut repo, 1, 70).unwrap_err().is_storage());

        assert_eq!(
            fs::read_to_string(repo.card_path(Position::new(1).unwrap())).unwrap(),
            "# Opening Image\n\nA sunrise over an empty field."
        );
        assert_eq!(store.get(1).unwrap().title, "Opening Image");
        assert!(store.get(70).unwrap().is_empty());
        assert!(!store.is_dirty());
    }
}
