//! Host configuration.

use serde::{Deserialize, Serialize};
use slidecraft_core::EditorConfig;
use slidecraft_core::storage::DEFAULT_AUTOSAVE_DELAY_MS;
use std::path::PathBuf;

/// Deck id used when none is given.
pub const DEFAULT_DECK_ID: &str = "untitled";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Key the deck's edit state is persisted under.
    pub deck_id: String,
    /// Where decks are stored. `None` means the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Debounce delay before a change is written.
    pub autosave_delay_ms: u64,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deck_id: DEFAULT_DECK_ID.to_string(),
            storage_dir: None,
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_deck_id(mut self, id: impl Into<String>) -> Self {
        self.deck_id = id.into();
        self
    }

    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage_dir = Some(dir);
        self
    }
}
