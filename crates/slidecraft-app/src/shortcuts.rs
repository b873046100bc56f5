//! Keyboard shortcut registry and documentation.

use slidecraft_core::tools::key_action;
use slidecraft_core::{Action, EditorKey, EditorState};

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutCommand {
    Undo,
    Redo,
    CopySlide,
    PasteSlide,
    DuplicateSlide,
    DeleteSlide,
    ToggleEditMode,
    NextSlide,
    PreviousSlide,
    DeleteSelection,
    ClearSelection,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: ShortcutCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: ShortcutCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        use ShortcutCommand::*;
        vec![
            Shortcut::new("Z", true, false, Undo, "Undo"),
            Shortcut::new("Z", true, true, Redo, "Redo"),
            Shortcut::new("Y", true, false, Redo, "Redo"),
            Shortcut::new("C", true, false, CopySlide, "Copy current slide"),
            Shortcut::new("V", true, false, PasteSlide, "Paste slide after current"),
            Shortcut::new("D", true, false, DuplicateSlide, "Duplicate current slide"),
            Shortcut::new("Backspace", true, true, DeleteSlide, "Delete current slide"),
            Shortcut::new("E", true, false, ToggleEditMode, "Toggle edit mode"),
            Shortcut::new("ArrowRight", false, false, NextSlide, "Next slide"),
            Shortcut::new("PageDown", false, false, NextSlide, "Next slide"),
            Shortcut::new("ArrowLeft", false, false, PreviousSlide, "Previous slide"),
            Shortcut::new("PageUp", false, false, PreviousSlide, "Previous slide"),
            Shortcut::new("Delete", false, false, DeleteSelection, "Delete selected element"),
            Shortcut::new("Backspace", false, false, DeleteSelection, "Delete selected element"),
            Shortcut::new("Escape", false, false, ClearSelection, "Clear selection"),
        ]
    }

    /// Look up the command bound to a key combination.
    pub fn command_for(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutCommand> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.command)
    }

    /// The action a key combination triggers in the current state.
    ///
    /// While a text field has focus only undo/redo pass through.
    pub fn action_for(
        state: &EditorState,
        key: &str,
        ctrl: bool,
        shift: bool,
        text_editing: bool,
    ) -> Option<Action> {
        let command = Self::command_for(key, ctrl, shift)?;
        if text_editing && !matches!(command, ShortcutCommand::Undo | ShortcutCommand::Redo) {
            return None;
        }
        let current = state.current_slide;
        match command {
            ShortcutCommand::Undo => Some(Action::Undo),
            ShortcutCommand::Redo => Some(Action::Redo),
            ShortcutCommand::CopySlide => Some(Action::CopySlide { position: current }),
            ShortcutCommand::PasteSlide => Some(Action::PasteSlide { after: current }),
            ShortcutCommand::DuplicateSlide => Some(Action::DuplicateSlide { position: current }),
            ShortcutCommand::DeleteSlide => Some(Action::DeleteSlide { position: current }),
            ShortcutCommand::ToggleEditMode => Some(Action::ToggleEditMode),
            ShortcutCommand::NextSlide => Some(Action::GoToSlide { index: current + 1 }),
            ShortcutCommand::PreviousSlide => Some(Action::GoToSlide {
                index: current.saturating_sub(1),
            }),
            ShortcutCommand::DeleteSelection => {
                let key = if key.eq_ignore_ascii_case("Delete") {
                    EditorKey::Delete
                } else {
                    EditorKey::Backspace
                };
                key_action(state, key, text_editing)
            }
            ShortcutCommand::ClearSelection => key_action(state, EditorKey::Escape, text_editing),
        }
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use slidecraft_core::document::TitleSlide;
    use slidecraft_core::{OverlayElement, SlideDocument};

    fn state() -> EditorState {
        EditorState::new(vec![
            SlideDocument::Title(TitleSlide::new("One")),
            SlideDocument::Title(TitleSlide::new("Two")),
        ])
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !(a.key == b.key && a.ctrl == b.ctrl && a.shift == b.shift),
                    "{} bound twice",
                    a.format()
                );
            }
        }
    }

    #[test]
    fn test_undo_redo_bindings() {
        let state = state();
        let action = |key, shift, text_editing| {
            ShortcutRegistry::action_for(&state, key, true, shift, text_editing)
        };
        assert_eq!(action("z", false, false), Some(Action::Undo));
        assert_eq!(action("Z", true, false), Some(Action::Redo));
        assert_eq!(action("y", false, true), Some(Action::Redo));
    }

    #[test]
    fn test_text_editing_blocks_slide_commands() {
        let state = state();
        assert!(ShortcutRegistry::action_for(&state, "D", true, false, true).is_none());
        assert_eq!(
            ShortcutRegistry::action_for(&state, "D", true, false, false),
            Some(Action::DuplicateSlide { position: 0 })
        );
    }

    #[test]
    fn test_delete_key_removes_selected_overlay() {
        let mut state = state();
        state.dispatch(Action::SetEditMode { enabled: true });
        let overlay = OverlayElement::rect_at(Point::new(50.0, 50.0), "#000");
        let id = overlay.id().to_string();
        state.dispatch(Action::AddOverlay { slide: 0, overlay });

        let action = ShortcutRegistry::action_for(&state, "Delete", false, false, false).unwrap();
        assert_eq!(
            action,
            Action::RemoveOverlay {
                slide: 0,
                overlay_id: id,
            }
        );
    }

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new("Z", true, true, ShortcutCommand::Redo, "Redo");
        assert_eq!(shortcut.format(), "Ctrl+Shift+Z");
    }
}
