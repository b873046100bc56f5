//! An editing session: one editor over one deck, with debounced autosave.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::shortcuts::ShortcutRegistry;
use kurbo::Point;
use slidecraft_core::storage::{AutoSaveManager, Storage};
use slidecraft_core::tools::click_action;
use slidecraft_core::{Action, EditorState, SlideDocument, export_document};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Owns the editor state and persists its deck after every change.
///
/// All mutation goes through [`EditorSession::dispatch`] so no change can
/// bypass autosave.
pub struct EditorSession<S: Storage> {
    state: EditorState,
    autosave: AutoSaveManager<S>,
}

impl<S: Storage> EditorSession<S> {
    /// Open a session over the host's baseline slides, resuming any persisted edits.
    pub async fn open(
        original_slides: Vec<SlideDocument>,
        storage: Arc<S>,
        config: &AppConfig,
    ) -> Self {
        let mut autosave = AutoSaveManager::new(storage, config.deck_id.clone());
        autosave.set_delay(Duration::from_millis(config.autosave_delay_ms));

        let deck = autosave.load_or_default().await;
        let state =
            EditorState::with_deck(original_slides, deck).with_config(config.editor.clone());
        log::info!(
            "Opened deck {} with {} slides",
            config.deck_id,
            state.slide_count()
        );
        Self { state, autosave }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn autosave(&self) -> &AutoSaveManager<S> {
        &self.autosave
    }

    /// Apply an action. Returns whether the deck changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.dispatch_at(action, Instant::now())
    }

    /// [`EditorSession::dispatch`] with an explicit clock, for scheduling.
    pub fn dispatch_at(&mut self, action: Action, now: Instant) -> bool {
        let before = self.state.deck.clone();
        self.state.dispatch(action);
        let changed = !Arc::ptr_eq(&before, &self.state.deck);
        if changed {
            self.autosave.schedule_at(self.state.deck.clone(), now);
        }
        changed
    }

    /// Route a canvas click through the active tool.
    pub fn click(&mut self, slide: usize, point: Point) -> bool {
        match click_action(&self.state, slide, point) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Route a key press through the shortcut registry.
    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool, text_editing: bool) -> bool {
        match ShortcutRegistry::action_for(&self.state, key, ctrl, shift, text_editing) {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Write the deck if the debounce delay has elapsed.
    pub async fn tick(&mut self, now: Instant) -> bool {
        self.autosave.flush_due(now).await
    }

    /// Write any pending change now, e.g. before closing.
    pub async fn flush(&mut self) -> bool {
        self.autosave.flush_now().await
    }

    // Host navigation surface

    pub fn go_to_slide(&mut self, index: usize) {
        self.dispatch(Action::GoToSlide { index });
    }

    pub fn insert_slide(&mut self, position: usize, document: SlideDocument) {
        self.dispatch(Action::InsertSlide { position, document });
    }

    pub fn delete_slide(&mut self, position: usize) {
        self.dispatch(Action::DeleteSlide { position });
    }

    pub fn copy_slide(&mut self, position: usize) {
        self.dispatch(Action::CopySlide { position });
    }

    pub fn paste_slide(&mut self, after: usize) {
        self.dispatch(Action::PasteSlide { after });
    }

    pub fn duplicate_slide(&mut self, position: usize) {
        self.dispatch(Action::DuplicateSlide { position });
    }

    pub fn move_slide(&mut self, from: usize, to: usize) {
        self.dispatch(Action::MoveSlide { from, to });
    }

    pub fn undo(&mut self) {
        self.dispatch(Action::Undo);
    }

    pub fn redo(&mut self) {
        self.dispatch(Action::Redo);
    }

    /// Export the effective slides as an interchange envelope.
    pub fn export(&self, title: &str, description: &str) -> AppResult<Vec<u8>> {
        Ok(export_document(title, description, &self.state.all_slides())?)
    }
}
