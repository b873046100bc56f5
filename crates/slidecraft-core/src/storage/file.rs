use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::deck::DeckEditState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// One pretty-printed JSON file per deck in a directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a truncated deck behind.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `base_path`. The directory is created if missing.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path).map_err(|e| io_error("create", &base_path, e))?;
        Ok(Self { base_path })
    }

    /// The platform data directory, e.g. `~/.local/share/slidecraft/decks/` on Linux.
    pub fn default_path() -> StorageResult<PathBuf> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine a data directory".to_string()))?;
        Ok(base.join("slidecraft").join("decks"))
    }

    pub fn default_location() -> StorageResult<Self> {
        Self::new(Self::default_path()?)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Ids are used as file stems verbatim, so only `[A-Za-z0-9_-]` is accepted.
    fn deck_path(&self, id: &str) -> StorageResult<PathBuf> {
        let valid_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if id.is_empty() || !id.chars().all(valid_char) {
            return Err(StorageError::Other(format!(
                "Invalid deck id {id:?}: use letters, digits, '-' or '_'"
            )));
        }
        Ok(self.base_path.join(id).with_extension(EXTENSION))
    }
}

fn io_error(action: &str, path: &Path, e: io::Error) -> StorageError {
    StorageError::Io(format!("Failed to {action} {}: {e}", path.display()))
}

impl Storage for FileStorage {
    fn save(&self, id: &str, deck: &DeckEditState) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.deck_path(id);
        let json = serde_json::to_string_pretty(deck)
            .map_err(|e| StorageError::Serialization(e.to_string()));

        Box::pin(async move {
            let path = path?;
            let json = json?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, json).map_err(|e| io_error("write", &tmp, e))?;
            fs::rename(&tmp, &path).map_err(|e| io_error("replace", &path, e))
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<DeckEditState>> {
        let path = self.deck_path(id);
        let id = id.to_string();

        Box::pin(async move {
            let path = path?;
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => return Err(io_error("read", &path, e)),
            };
            serde_json::from_str(&json).map_err(|e| {
                StorageError::Serialization(format!("{} is not a deck: {e}", path.display()))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.deck_path(id);

        Box::pin(async move {
            let path = path?;
            match fs::remove_file(&path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error("delete", &path, e)),
                _ => Ok(()),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries =
                fs::read_dir(&self.base_path).map_err(|e| io_error("list", &self.base_path, e))?;

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
                .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.deck_path(id);
        Box::pin(async move { Ok(path?.is_file()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{SlideDocument, TitleSlide};
    use crate::slide_list::SlideEntry;
    use crate::storage::block_on;
    use tempfile::tempdir;

    fn restructured_deck() -> DeckEditState {
        DeckEditState::default().with_slide_list(vec![
            SlideEntry::added(SlideDocument::Title(TitleSlide::new("Cover"))),
            SlideEntry::Original { index: 0 },
        ])
    }

    #[test]
    fn test_save_load_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let deck = restructured_deck();

        block_on(storage.save("quarterly", &deck)).unwrap();
        block_on(storage.save("quarterly", &deck)).unwrap();
        assert_eq!(block_on(storage.load("quarterly")).unwrap(), deck);

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().flatten().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_creates_nested_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert_eq!(storage.base_path(), nested.as_path());
        assert!(nested.is_dir());
    }

    #[test]
    fn test_not_found_and_corrupt() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            block_on(storage.load("nonexistent")),
            Err(StorageError::NotFound(_))
        ));

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(matches!(
            block_on(storage.load("broken")),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        block_on(storage.save("deck2", &DeckEditState::default())).unwrap();
        block_on(storage.save("deck1", &DeckEditState::default())).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), ["deck1", "deck2"]);

        block_on(storage.delete("deck1")).unwrap();
        block_on(storage.delete("deck1")).unwrap();
        assert!(!block_on(storage.exists("deck1")).unwrap());
        assert!(block_on(storage.exists("deck2")).unwrap());
    }

    #[test]
    fn test_rejects_ids_that_are_not_file_stems() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let deck = restructured_deck();

        for id in ["team/deck", "../escape", "a.b", ""] {
            assert!(matches!(
                block_on(storage.save(id, &deck)),
                Err(StorageError::Other(_))
            ));
            assert!(block_on(storage.exists(id)).is_err());
        }

        // Distinct ids stay distinct files.
        block_on(storage.save("a_b", &deck)).unwrap();
        block_on(storage.save("a-b", &DeckEditState::default())).unwrap();
        assert_eq!(block_on(storage.list()).unwrap(), ["a-b", "a_b"]);
        assert_eq!(block_on(storage.load("a_b")).unwrap(), deck);
    }
}
