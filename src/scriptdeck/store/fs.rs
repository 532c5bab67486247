use super::CardRepository;
use crate::config::ProjectConfig;
use crate::error::{Result, ScriptError};
use crate::model::{decode_unit, encode_unit, Card, Deck, Position};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const CARDS_DIR: &str = "cards";
pub const EXPORTS_DIR: &str = "exports";
const CARD_EXT: &str = ".md";

pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn cards_dir(&self) -> PathBuf {
        self.root.join(CARDS_DIR)
    }

    fn card_filename(position: Position) -> String {
        format!("{:02}{}", position.get(), CARD_EXT)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(|e| ScriptError::storage(path, e))?;
        }
        Ok(())
    }

    fn read_unit(&self, position: Position) -> Result<Option<Card>> {
        let path = self.card_path(position);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ScriptError::storage(&path, e)),
        };
        let raw = String::from_utf8(bytes).map_err(|e| ScriptError::CorruptUnit {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(decode_unit(position, &raw)))
    }

    /// Writes the unit next to its final location; `commit` moves it into place.
    fn stage(&self, card: &Card) -> Result<PathBuf> {
        let target = self.card_path(card.position);
        if target.is_dir() {
            return Err(ScriptError::storage(
                &target,
                std::io::Error::other("a directory occupies the card unit path"),
            ));
        }

        let tmp = self.cards_dir().join(format!(
            ".{:02}-{}.tmp",
            card.position.get(),
            Uuid::new_v4()
        ));
        fs::write(&tmp, encode_unit(card)).map_err(|e| ScriptError::storage(&tmp, e))?;
        Ok(tmp)
    }

    fn commit(&self, tmp: &Path, position: Position) -> Result<()> {
        let target = self.card_path(position);
        fs::rename(tmp, &target).map_err(|e| ScriptError::storage(&target, e))
    }

    /// Renames staged units into place. On failure the units not yet
    /// committed are removed, so no temp file outlives the call.
    fn commit_all(&self, staged: &[(PathBuf, Position)]) -> Result<()> {
        for (i, (tmp, position)) in staged.iter().enumerate() {
            if let Err(e) = self.commit(tmp, *position) {
                for (rest, _) in &staged[i..] {
                    let _ = fs::remove_file(rest);
                }
                return Err(e);
            }
        }
        Ok(())
    }
}

impl CardRepository for FileRepository {
    fn load(&self) -> Result<Deck> {
        let cards_dir = self.cards_dir();
        if !cards_dir.exists() {
            tracing::debug!(root = %self.root.display(), "no cards directory, starting empty");
            return Ok(Deck::empty());
        }

        let mut cards = Vec::new();
        for position in Position::all() {
            if let Some(card) = self.read_unit(position)? {
                cards.push(card);
            }
        }
        tracing::debug!(found = cards.len(), root = %self.root.display(), "loaded deck");
        Ok(Deck::from_cards(cards))
    }

    fn save(&mut self, card: &Card) -> Result<()> {
        self.save_all(std::slice::from_ref(card))
    }

    /// Stages every card first and only renames once all writes succeeded,
    /// so a failed save leaves the previous units untouched.
    fn save_all(&mut self, cards: &[Card]) -> Result<()> {
        if cards.is_empty() {
            return Ok(());
        }
        self.ensure_layout()?;

        let mut staged = Vec::with_capacity(cards.len());
        for card in cards {
            match self.stage(card) {
                Ok(tmp) => staged.push((tmp, card.position)),
                Err(e) => {
                    for (tmp, _) in &staged {
                        let _ = fs::remove_file(tmp);
                    }
                    return Err(e);
                }
            }
        }

        self.commit_all(&staged)?;

        tracing::debug!(
            positions = ?cards.iter().map(|c| c.position.get()).collect::<Vec<_>>(),
            "saved cards"
        );
        Ok(())
    }

    fn ensure_layout(&mut self) -> Result<()> {
        self.ensure_dir(&self.root)?;
        self.ensure_dir(&self.cards_dir())?;
        self.ensure_dir(&self.exports_dir())?;
        Ok(())
    }

    fn load_config(&self) -> Result<ProjectConfig> {
        ProjectConfig::load(&self.root)
    }

    fn save_config(&mut self, config: &ProjectConfig) -> Result<()> {
        config.save(&self.root)
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn card_path(&self, position: Position) -> PathBuf {
        self.cards_dir().join(Self::card_filename(position))
    }

    fn exports_dir(&self) -> PathBuf {
        self.root.join(EXPORTS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pos(n: usize) -> Position {
        Position::new(n).unwrap()
    }

    #[test]
    fn test_load_missing_project_is_empty_deck() {
        let dir = TempDir::new().unwrap();
        let repo = FileRepository::new(dir.path().join("does-not-exist"));
        let deck = repo.load().unwrap();
        assert_eq!(deck, Deck::empty());
    }

    #[test]
    fn test_save_creates_layout() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("script");
        let mut repo = FileRepository::new(&root);

        repo.save(&Card::new(pos(1), "Opening Image", "Sunrise."))
            .unwrap();

        assert!(root.join(CARDS_DIR).is_dir());
        assert!(root.join(EXPORTS_DIR).is_dir());
        assert!(root.join(CARDS_DIR).join("01.md").is_file());
    }

    #[test]
    fn test_card_filename_is_zero_padded() {
        let repo = FileRepository::new("/tmp/project");
        assert!(repo.card_path(pos(7)).ends_with("cards/07.md"));
        assert!(repo.card_path(pos(70)).ends_with("cards/70.md"));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        let card = Card::new(pos(12), "Fun and Games", "  line one\n\nline three\n  ");

        repo.save(&card).unwrap();
        let deck = repo.load().unwrap();

        assert_eq!(deck.get(pos(12)), &card);
        assert_eq!(deck.len(), 70);
    }

    #[test]
    fn test_load_reads_legacy_files() {
        let dir = TempDir::new().unwrap();
        let cards = dir.path().join(CARDS_DIR);
        fs::create_dir_all(&cards).unwrap();
        fs::write(cards.join("03.md"), "# Setup\n\nWe meet the hero.").unwrap();
        fs::write(cards.join("04.md"), "No header here").unwrap();
        fs::write(cards.join("notes.txt"), "ignored").unwrap();

        let deck = FileRepository::new(dir.path()).load().unwrap();
        assert_eq!(deck.get(pos(3)).title, "Setup");
        assert_eq!(deck.get(pos(3)).body, "We meet the hero.");
        assert_eq!(deck.get(pos(4)).title, "");
        assert_eq!(deck.get(pos(4)).body, "No header here");
        assert!(deck.get(pos(5)).is_empty());
    }

    #[test]
    fn test_load_rejects_non_utf8_unit() {
        let dir = TempDir::new().unwrap();
        let cards = dir.path().join(CARDS_DIR);
        fs::create_dir_all(&cards).unwrap();
        fs::write(cards.join("02.md"), [0xffu8, 0xfe, 0x00]).unwrap();

        let err = FileRepository::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, ScriptError::CorruptUnit { .. }));
        assert!(err.is_storage());
    }

    #[test]
    fn test_save_all_leaves_no_tmp_files() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        repo.save_all(&[
            Card::new(pos(1), "A", "a"),
            Card::new(pos(70), "B", "b"),
        ])
        .unwrap();

        for entry in fs::read_dir(dir.path().join(CARDS_DIR)).unwrap() {
            let name = entry.unwrap().file_name().into_string().unwrap();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
        let deck = repo.load().unwrap();
        assert_eq!(deck.get(pos(1)).title, "A");
        assert_eq!(deck.get(pos(70)).title, "B");
    }

    fn leftover_tmp_files(dir: &Path) -> Vec<String> {
        fs::read_dir(dir.join(CARDS_DIR))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .filter(|name| name.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn test_failed_staging_leaves_units_untouched() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        repo.save(&Card::new(pos(1), "Opening Image", "Sunrise."))
            .unwrap();

        // A directory where unit 70 belongs makes the second stage fail
        let blocker = repo.card_path(pos(70));
        fs::create_dir_all(blocker.join("keep")).unwrap();

        let swapped = [
            Card::new(pos(1), "", ""),
            Card::new(pos(70), "Opening Image", "Sunrise."),
        ];
        let err = repo.save_all(&swapped).unwrap_err();
        assert!(err.is_storage());

        assert_eq!(
            fs::read_to_string(repo.card_path(pos(1))).unwrap(),
            "# Opening Image\n\nSunrise."
        );
        assert!(blocker.is_dir());
        assert!(leftover_tmp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_commit_removes_remaining_staged_units() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        repo.ensure_layout().unwrap();

        let first = repo.stage(&Card::new(pos(1), "A", "a")).unwrap();
        let second = repo.stage(&Card::new(pos(2), "B", "b")).unwrap();
        let third = repo.stage(&Card::new(pos(3), "C", "c")).unwrap();
        fs::create_dir_all(repo.card_path(pos(2)).join("keep")).unwrap();

        let staged = vec![(first, pos(1)), (second, pos(2)), (third, pos(3))];
        assert!(repo.commit_all(&staged).is_err());

        assert!(leftover_tmp_files(dir.path()).is_empty());
        assert_eq!(
            fs::read_to_string(repo.card_path(pos(1))).unwrap(),
            "# A\n\na"
        );
        assert!(!repo.card_path(pos(3)).exists());
    }

    #[test]
    fn test_save_overwrites_existing_unit() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        repo.save(&Card::new(pos(5), "Old", "old body")).unwrap();
        repo.save(&Card::new(pos(5), "", "")).unwrap();

        assert!(repo.load().unwrap().get(pos(5)).is_empty());
    }

    #[test]
    fn test_config_roundtrip_through_repository() {
        let dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(dir.path());
        let config = ProjectConfig {
            title: Some("Blue Hour".into()),
            author: None,
        };
        repo.save_config(&config).unwrap();
        assert_eq!(repo.load_config().unwrap(), config);
    }
}
