//! The closed set of editor actions.

use crate::block::{BlockData, BlockId, ContentBlock};
use crate::document::{SlideDocument, SlideKind};
use crate::geometry::LayoutBox;
use crate::overlay::{OverlayElement, OverlayId};
use crate::selection::Selection;
use crate::tools::Tool;
use serde::{Deserialize, Serialize};

/// An action the reducer understands. Slide arguments are current positions.
///
/// `*Quiet` variants update live state without an undo checkpoint; they are
/// meant to follow a [`Action::BeginDrag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    // Mode and scratch state
    SetEditMode { enabled: bool },
    ToggleEditMode,
    SetTool { tool: Tool },
    SetColor { color: String },
    Select { target: Option<Selection> },
    GoToSlide { index: usize },

    // Gestures
    BeginDrag,
    EndDrag,
    CancelDrag,

    // Content box and slide data
    SetContentBox { slide: usize, frame: LayoutBox },
    SetContentBoxQuiet { slide: usize, frame: LayoutBox },
    ResetContentBox { slide: usize },
    SetSlideData {
        slide: usize,
        document: SlideDocument,
    },
    ResetSlideData { slide: usize },
    ConvertSlideType { slide: usize, kind: SlideKind },

    // Overlays
    AddOverlay {
        slide: usize,
        overlay: OverlayElement,
    },
    UpdateOverlay {
        slide: usize,
        overlay: OverlayElement,
    },
    UpdateOverlayQuiet {
        slide: usize,
        overlay: OverlayElement,
    },
    RemoveOverlay { slide: usize, overlay_id: OverlayId },

    // Blocks
    AddBlock { slide: usize, block: ContentBlock },
    UpdateBlock { slide: usize, block: ContentBlock },
    UpdateBlockQuiet { slide: usize, block: ContentBlock },
    RemoveBlock { slide: usize, block_id: BlockId },
    UpdateBlockData {
        slide: usize,
        block_id: BlockId,
        data: BlockData,
    },

    // Structure
    InsertSlide {
        position: usize,
        document: SlideDocument,
    },
    InsertBlankSlide { position: usize },
    ApplyTemplate {
        slide: usize,
        document: SlideDocument,
    },
    DismissTemplatePicker,
    DeleteSlide { position: usize },
    MoveSlide { from: usize, to: usize },
    DuplicateSlide { position: usize },
    CopySlide { position: usize },
    PasteSlide { after: usize },

    // History
    Undo,
    Redo,
}

impl Action {
    /// True for live-drag updates that never create an undo checkpoint.
    pub fn is_quiet(&self) -> bool {
        matches!(
            self,
            Action::SetContentBoxQuiet { .. }
                | Action::UpdateOverlayQuiet { .. }
                | Action::UpdateBlockQuiet { .. }
        )
    }
}
