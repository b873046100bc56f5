//! Editor tuning knobs.

use crate::geometry::MIN_SIZE;
use crate::history::MAX_UNDO_HISTORY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum number of undo snapshots.
    pub history_limit: usize,
    /// Smallest width/height a resize may produce (percent).
    pub min_size: f64,
    /// Shortest line a line-tool drag commits (percent).
    pub min_line_length: f64,
    /// Hit tolerance for overlays (percent).
    pub hit_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_UNDO_HISTORY,
            min_size: MIN_SIZE,
            min_line_length: 1.0,
            hit_tolerance: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"historyLimit": 10}"#).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.min_size, MIN_SIZE);
        assert_eq!(config.min_line_length, 1.0);
    }
}
