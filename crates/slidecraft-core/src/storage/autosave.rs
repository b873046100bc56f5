//! Debounced persistence of the deck edit state.
//!
//! Every change schedules a flush a short delay in the future; a newer change
//! replaces the pending one, so a burst of edits costs one write. Each flush
//! writes the full deck, so a failed write is simply dropped and the next one
//! catches up.

use crate::deck::DeckEditState;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Default debounce delay in milliseconds.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 800;

struct PendingSave {
    deadline: Instant,
    deck: Arc<DeckEditState>,
}

/// Manages debounced persistence of one deck.
pub struct AutoSaveManager<S: Storage> {
    storage: Arc<S>,
    delay: Duration,
    deck_id: String,
    /// At most one flush is ever pending.
    pending: Option<PendingSave>,
    last_save: Option<Instant>,
}

impl<S: Storage> AutoSaveManager<S> {
    pub fn new(storage: Arc<S>, deck_id: impl Into<String>) -> Self {
        Self {
            storage,
            delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
            deck_id: deck_id.into(),
            pending: None,
            last_save: None,
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    /// Switch to another deck. Drops any pending flush of the previous one.
    pub fn set_deck_id(&mut self, id: impl Into<String>) {
        self.cancel();
        self.deck_id = id.into();
    }

    /// Schedule a flush of `deck` one delay from now.
    pub fn schedule(&mut self, deck: Arc<DeckEditState>) {
        self.schedule_at(deck, Instant::now());
    }

    /// Schedule a flush of `deck` one delay after `now`, cancelling any pending one.
    pub fn schedule_at(&mut self, deck: Arc<DeckEditState>, now: Instant) {
        if self.pending.is_some() {
            log::debug!("Autosave for {} superseded", self.deck_id);
        }
        self.pending = Some(PendingSave {
            deadline: now + self.delay,
            deck,
        });
    }

    /// Drop the pending flush, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the pending flush's deadline has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.pending.as_ref().is_some_and(|p| now >= p.deadline)
    }

    pub fn last_save(&self) -> Option<Instant> {
        self.last_save
    }

    /// Write the pending deck if its deadline has passed.
    /// Returns true if a write succeeded.
    pub async fn flush_due(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.flush_now().await
    }

    /// Write the pending deck immediately, ignoring the deadline.
    /// Returns true if a write succeeded.
    pub async fn flush_now(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        match self.storage.save(&self.deck_id, &pending.deck).await {
            Ok(()) => {
                self.last_save = Some(Instant::now());
                log::debug!("Autosaved deck {}", self.deck_id);
                true
            }
            Err(e) => {
                log::warn!("Autosave of deck {} failed: {}", self.deck_id, e);
                false
            }
        }
    }

    /// Load the persisted deck. Best effort: a missing or unreadable deck
    /// yields an empty edit state over the baseline.
    pub async fn load_or_default(&self) -> DeckEditState {
        match self.storage.load(&self.deck_id).await {
            Ok(deck) => {
                log::info!("Loaded deck {}", self.deck_id);
                deck
            }
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved state for deck {}, starting fresh", self.deck_id);
                DeckEditState::default()
            }
            Err(e) => {
                log::error!("Failed to load deck {}: {}", self.deck_id, e);
                DeckEditState::default()
            }
        }
    }

    /// Remove the persisted deck and any pending flush.
    pub async fn delete(&mut self) -> StorageResult<()> {
        self.cancel();
        self.storage.delete(&self.deck_id).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::MemoryStorage>> {
    Ok(Arc::new(crate::storage::MemoryStorage::new()))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::MemoryStorage;

/// Type alias for the auto-save manager with platform-specific storage.
pub type PlatformAutoSaveManager = AutoSaveManager<PlatformStorage>;

/// Convenience function to create an auto-save manager with default storage.
pub fn create_autosave_manager(deck_id: &str) -> StorageResult<PlatformAutoSaveManager> {
    let storage = create_default_storage()?;
    Ok(AutoSaveManager::new(storage, deck_id))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::geometry::LayoutBox;
    use crate::slide_list::SlideId;
    use crate::storage::{BoxFuture, MemoryStorage, block_on};

    /// Storage whose writes always fail.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn save(&self, _id: &str, _deck: &DeckEditState) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("disk full".into())) })
        }
        fn load(&self, _id: &str) -> BoxFuture<'_, StorageResult<DeckEditState>> {
            Box::pin(async { Err(StorageError::Io("unreadable".into())) })
        }
        fn delete(&self, _id: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }
        fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
            Box::pin(async { Ok(vec![]) })
        }
        fn exists(&self, _id: &str) -> BoxFuture<'_, StorageResult<bool>> {
            Box::pin(async { Ok(false) })
        }
    }

    fn deck_with_box(x: f64) -> Arc<DeckEditState> {
        Arc::new(
            DeckEditState::default().with_slide_state(SlideId::Original(0), |s| {
                s.with_content_box(Some(LayoutBox::new(x, 0.0, 50.0, 50.0)))
            }),
        )
    }

    #[test]
    fn test_flush_waits_for_deadline() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone(), "deck");
        let now = Instant::now();

        manager.schedule_at(deck_with_box(1.0), now);
        assert!(manager.has_pending());
        assert!(!block_on(manager.flush_due(now)));
        assert!(!block_on(storage.exists("deck")).unwrap());

        assert!(block_on(manager.flush_due(now + manager.delay())));
        assert!(!manager.has_pending());
        assert!(manager.last_save().is_some());
    }

    #[test]
    fn test_new_schedule_supersedes_pending() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone(), "deck");
        let start = Instant::now();
        let delay = manager.delay();

        manager.schedule_at(deck_with_box(1.0), start);
        manager.schedule_at(deck_with_box(2.0), start + delay / 2);

        // The first deadline passed, but it was replaced by the second.
        assert!(!manager.is_due(start + delay));
        assert!(block_on(manager.flush_due(start + delay * 2)));

        let saved = block_on(storage.load("deck")).unwrap();
        assert_eq!(saved, *deck_with_box(2.0));
        assert!(!block_on(manager.flush_now()));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage.clone(), "deck");
        manager.schedule(deck_with_box(1.0));
        manager.cancel();
        assert!(!block_on(manager.flush_now()));
        assert!(!block_on(storage.exists("deck")).unwrap());
    }

    #[test]
    fn test_failed_save_is_dropped() {
        let mut manager = AutoSaveManager::new(Arc::new(BrokenStorage), "deck");
        manager.schedule(deck_with_box(1.0));
        assert!(!block_on(manager.flush_now()));
        assert!(!manager.has_pending());
    }

    #[test]
    fn test_load_or_default() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = AutoSaveManager::new(storage.clone(), "deck");
        assert!(block_on(manager.load_or_default()).is_pristine());

        block_on(storage.save("deck", &deck_with_box(3.0))).unwrap();
        assert_eq!(block_on(manager.load_or_default()), *deck_with_box(3.0));

        let broken = AutoSaveManager::new(Arc::new(BrokenStorage), "deck");
        assert!(block_on(broken.load_or_default()).is_pristine());
    }

    #[test]
    fn test_switching_deck_cancels_pending() {
        let storage = Arc::new(MemoryStorage::new());
        let mut manager = AutoSaveManager::new(storage, "a");
        manager.schedule(deck_with_box(1.0));
        manager.set_deck_id("b");
        assert_eq!(manager.deck_id(), "b");
        assert!(!manager.has_pending());
    }
}
