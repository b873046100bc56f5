//! SlideCraft Core Library
//!
//! Platform-agnostic editor state and geometry for structured slide decks:
//! slide documents, overlays and blocks, the slide-list materializer, the
//! undoable edit reducer, export/import and persistence.

pub mod action;
pub mod block;
pub mod config;
pub mod deck;
pub mod document;
pub mod drag;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod id;
pub mod interchange;
pub mod overlay;
pub mod selection;
pub mod slide_list;
pub mod storage;
pub mod tools;

pub use action::Action;
pub use block::{BlockData, BlockId, BlockSlide, ContentBlock};
pub use config::EditorConfig;
pub use deck::{DeckEditState, SlideEditState};
pub use document::{SlideDocument, SlideKind};
pub use drag::{DragState, LineDraft, MoveSession, ResizeSession};
pub use editor::{EditorState, reduce};
pub use geometry::{
    LayoutBox, MIN_SIZE, ResizeConstraint, ResizeHandle, apply_resize, resize_constraint_for,
};
pub use history::{History, MAX_UNDO_HISTORY};
pub use interchange::{DeckMeta, ExportError, ImportError, export_document, import_document};
pub use overlay::{OverlayElement, OverlayId};
pub use selection::Selection;
pub use slide_list::{SlideEntry, SlideId, materialize_slide_list};
pub use tools::{EditorKey, Tool};
