use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::deck::DeckEditState;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local storage. Used on wasm and in tests; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStorage {
    decks: RwLock<HashMap<String, DeckEditState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored decks.
    pub fn len(&self) -> usize {
        self.read().map(|decks| decks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, HashMap<String, DeckEditState>>> {
        self.decks.read().map_err(|e| StorageError::Other(format!("Lock poisoned: {e}")))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, HashMap<String, DeckEditState>>> {
        self.decks.write().map_err(|e| StorageError::Other(format!("Lock poisoned: {e}")))
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, deck: &DeckEditState) -> BoxFuture<'_, StorageResult<()>> {
        // Snapshot eagerly; slide states are Arc-shared so this is shallow.
        let entry = (id.to_string(), deck.clone());
        Box::pin(async move {
            self.write()?.insert(entry.0, entry.1);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<DeckEditState>> {
        let id = id.to_string();
        Box::pin(async move {
            let found = self.read()?.get(&id).cloned();
            found.ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.write()?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let mut ids: Vec<String> = self.read()?.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.read()?.contains_key(&id)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LayoutBox;
    use crate::slide_list::SlideId;
    use crate::storage::block_on;

    fn edited_deck() -> DeckEditState {
        DeckEditState::default().with_slide_state(SlideId::Original(0), |s| {
            s.with_content_box(Some(LayoutBox::new(10.0, 10.0, 80.0, 80.0)))
        })
    }

    #[test]
    fn test_save_replaces_previous() {
        let storage = MemoryStorage::new();
        block_on(storage.save("deck", &DeckEditState::default())).unwrap();
        block_on(storage.save("deck", &edited_deck())).unwrap();

        assert_eq!(storage.len(), 1);
        assert_eq!(block_on(storage.load("deck")).unwrap(), edited_deck());
    }

    #[test]
    fn test_missing_deck() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());
        assert!(matches!(
            block_on(storage.load("nonexistent")),
            Err(StorageError::NotFound(id)) if id == "nonexistent"
        ));
        // Deleting something that was never saved is fine.
        block_on(storage.delete("nonexistent")).unwrap();
    }

    #[test]
    fn test_exists_delete_and_sorted_list() {
        let storage = MemoryStorage::new();
        block_on(storage.save("b", &edited_deck())).unwrap();
        block_on(storage.save("a", &DeckEditState::default())).unwrap();
        assert!(block_on(storage.exists("b")).unwrap());
        assert_eq!(block_on(storage.list()).unwrap(), ["a", "b"]);

        block_on(storage.delete("b")).unwrap();
        assert!(!block_on(storage.exists("b")).unwrap());
        assert_eq!(block_on(storage.list()).unwrap(), ["a"]);
    }
}
