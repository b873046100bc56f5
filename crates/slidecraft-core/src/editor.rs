//! Editor state and the reducer.
//!
//! [`reduce`] is the single transition function over [`Action`]. Every
//! history-bearing action snapshots the current deck before changing it;
//! quiet actions don't. Illegal operations (out-of-range positions, deleting
//! the last slide, pasting an empty clipboard, unknown ids) leave the state
//! unchanged.

use crate::action::Action;
use crate::block::BlockSlide;
use crate::config::EditorConfig;
use crate::deck::{DeckEditState, SlideEditState};
use crate::document::{SlideDocument, convert_document};
use crate::drag::DragState;
use crate::geometry::{LayoutBox, ResizeConstraint, resize_constraint_for};
use crate::history::History;
use crate::overlay::OverlayElement;
use crate::selection::{IndexShift, Selection};
use crate::slide_list::{SlideEntry, SlideId, materialize_slide_list, slide_count};
use crate::tools::Tool;
use std::sync::Arc;

/// Color new overlays get until the user picks one.
pub const DEFAULT_COLOR: &str = "#1f2937";

/// Root state of one deck-editing session.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub edit_mode: bool,
    pub selection: Option<Selection>,
    pub active_tool: Tool,
    pub active_color: String,
    /// The undoable payload.
    pub deck: Arc<DeckEditState>,
    pub history: History<Arc<DeckEditState>>,
    /// Last copied slide.
    pub clipboard: Option<Arc<SlideDocument>>,
    /// Baseline documents from the host. Never mutated.
    pub original_slides: Arc<Vec<Arc<SlideDocument>>>,
    /// A freshly inserted blank slide awaiting a template choice.
    pub pending_template_slide_index: Option<usize>,
    pub current_slide: usize,
    pub drag: DragState,
    pub config: EditorConfig,
}

/// Apply one action to a state, returning the next state.
pub fn reduce(state: &EditorState, action: Action) -> EditorState {
    state.clone().apply(action)
}

impl EditorState {
    /// A session over the given baseline with no edits.
    pub fn new(original_slides: Vec<SlideDocument>) -> Self {
        Self::with_deck(original_slides, DeckEditState::default())
    }

    /// A session resuming a previously persisted edit state.
    pub fn with_deck(original_slides: Vec<SlideDocument>, deck: DeckEditState) -> Self {
        let config = EditorConfig::default();
        Self {
            edit_mode: false,
            selection: None,
            active_tool: Tool::Select,
            active_color: DEFAULT_COLOR.to_string(),
            deck: Arc::new(deck),
            history: History::with_limit(config.history_limit),
            clipboard: None,
            original_slides: Arc::new(original_slides.into_iter().map(Arc::new).collect()),
            pending_template_slide_index: None,
            current_slide: 0,
            drag: DragState::Idle,
            config,
        }
    }

    /// Replace the configuration. Resets history to the new limit.
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.history = History::with_limit(config.history_limit);
        self.config = config;
        self
    }

    /// Consume the state, apply an action and return the result.
    pub fn apply(mut self, action: Action) -> Self {
        self.dispatch(action);
        self
    }

    /// Apply an action in place.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SetEditMode { enabled } => self.set_edit_mode(enabled),
            Action::ToggleEditMode => self.set_edit_mode(!self.edit_mode),
            Action::SetTool { tool } => self.active_tool = tool,
            Action::SetColor { color } => self.active_color = color,
            Action::Select { target } => self.select(target),
            Action::GoToSlide { index } => {
                let count = self.slide_count();
                self.current_slide = index.min(count.saturating_sub(1));
            }

            Action::BeginDrag => self.begin_drag(),
            Action::EndDrag => self.drag = DragState::Idle,
            Action::CancelDrag => self.cancel_drag(),

            Action::SetContentBox { slide, frame } => self.set_content_box(slide, frame, false),
            Action::SetContentBoxQuiet { slide, frame } => self.set_content_box(slide, frame, true),
            Action::ResetContentBox { slide } => {
                self.edit_slide(slide, false, |s| s.content_box.map(|_| s.with_content_box(None)));
            }
            Action::SetSlideData { slide, document } => {
                self.edit_slide(slide, false, |s| Some(s.with_override(Some(Arc::new(document)))));
            }
            Action::ResetSlideData { slide } => {
                self.edit_slide(slide, false, |s| {
                    s.slide_data_override.as_ref().map(|_| s.with_override(None))
                });
            }
            Action::ConvertSlideType { slide, kind } => {
                let Some(current) = self.effective_slide_data(slide) else {
                    log::debug!("Convert ignored: no slide at {slide}");
                    return;
                };
                if current.kind() == kind {
                    return;
                }
                let converted = Arc::new(convert_document(&current, kind));
                self.edit_slide(slide, false, |s| Some(s.with_override(Some(converted))));
            }

            Action::AddOverlay { slide, overlay } => {
                let id = overlay.id().to_string();
                if self.edit_slide(slide, false, |s| Some(s.with_overlay_added(overlay))) {
                    self.selection = Some(Selection::Overlay {
                        slide_index: slide,
                        overlay_id: id,
                    });
                }
            }
            Action::UpdateOverlay { slide, overlay } => {
                self.edit_slide(slide, false, |s| s.with_overlay_replaced(overlay));
            }
            Action::UpdateOverlayQuiet { slide, overlay } => {
                self.edit_slide(slide, true, |s| s.with_overlay_replaced(overlay));
            }
            Action::RemoveOverlay { slide, overlay_id } => {
                if self.edit_slide(slide, false, |s| s.with_overlay_removed(&overlay_id))
                    && self.selection.as_ref().is_some_and(|sel| sel.is_overlay(slide, &overlay_id))
                {
                    self.selection = None;
                }
            }

            Action::AddBlock { slide, block } => {
                let id = block.id.clone();
                if self.edit_block_slide(slide, false, |b| Some(b.with_block_added(block))) {
                    self.selection = Some(Selection::Block {
                        slide_index: slide,
                        block_id: id,
                    });
                }
            }
            Action::UpdateBlock { slide, block } => {
                self.edit_block_slide(slide, false, |b| b.with_block_replaced(block));
            }
            Action::UpdateBlockQuiet { slide, block } => {
                self.edit_block_slide(slide, true, |b| b.with_block_replaced(block));
            }
            Action::RemoveBlock { slide, block_id } => {
                if self.edit_block_slide(slide, false, |b| b.with_block_removed(&block_id))
                    && self.selection.as_ref().is_some_and(|sel| sel.is_block(slide, &block_id))
                {
                    self.selection = None;
                }
            }
            Action::UpdateBlockData {
                slide,
                block_id,
                data,
            } => {
                self.edit_block_slide(slide, false, |b| b.with_block_data(&block_id, data));
            }

            Action::InsertSlide { position, document } => {
                self.insert_entry(position, SlideEntry::added(document));
            }
            Action::InsertBlankSlide { position } => {
                if self.insert_entry(position, SlideEntry::added(SlideDocument::blank())) {
                    self.pending_template_slide_index = Some(position);
                }
            }
            Action::ApplyTemplate { slide, document } => {
                self.edit_slide(slide, false, |s| Some(s.with_override(Some(Arc::new(document)))));
                // A template identical to the current document still answers the picker.
                if self.pending_template_slide_index == Some(slide) {
                    self.pending_template_slide_index = None;
                }
            }
            Action::DismissTemplatePicker => self.pending_template_slide_index = None,
            Action::DeleteSlide { position } => self.delete_entry(position),
            Action::MoveSlide { from, to } => self.move_entry(from, to),
            Action::DuplicateSlide { position } => {
                let Some(document) = self.effective_slide_data(position) else {
                    log::debug!("Duplicate ignored: no slide at {position}");
                    return;
                };
                self.insert_entry(position + 1, SlideEntry::added(fresh_copy(&document)));
            }
            Action::CopySlide { position } => {
                if let Some(document) = self.effective_slide_data(position) {
                    self.clipboard = Some(Arc::new(document.as_ref().clone()));
                }
            }
            Action::PasteSlide { after } => {
                let Some(clipboard) = self.clipboard.clone() else {
                    log::debug!("Paste ignored: clipboard is empty");
                    return;
                };
                if after >= self.slide_count() {
                    log::debug!("Paste ignored: no slide at {after}");
                    return;
                }
                self.insert_entry(after + 1, SlideEntry::added(fresh_copy(&clipboard)));
            }

            Action::Undo => {
                if let Some(previous) = self.history.undo(self.deck.clone()) {
                    self.deck = previous;
                    self.after_history_jump();
                }
            }
            Action::Redo => {
                if let Some(next) = self.history.redo(self.deck.clone()) {
                    self.deck = next;
                    self.after_history_jump();
                }
            }
        }
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

    // Selectors

    pub fn slide_count(&self) -> usize {
        slide_count(&self.deck, self.original_slides.len())
    }

    pub fn slide_entries(&self) -> Vec<SlideEntry> {
        materialize_slide_list(&self.deck, self.original_slides.len())
    }

    /// The document the renderer draws at a position: the override if any,
    /// else the entry's base document.
    pub fn effective_slide_data(&self, position: usize) -> Option<Arc<SlideDocument>> {
        let entry = self.entry_at(position)?;
        if let Some(document) = self
            .deck
            .slide_state(entry.id())
            .and_then(|s| s.slide_data_override.clone())
        {
            return Some(document);
        }
        entry.base_document(&self.original_slides).cloned()
    }

    /// The content box at a position; full-bleed when not overridden.
    pub fn content_box(&self, position: usize) -> Option<LayoutBox> {
        let state = self.slide_state_at(position)?;
        Some(state.and_then(|s| s.content_box).unwrap_or(LayoutBox::FULL_BLEED))
    }

    pub fn overlays(&self, position: usize) -> &[OverlayElement] {
        self.slide_id(position)
            .and_then(|id| self.deck.slide_state(id))
            .map(|s| s.overlays.as_slice())
            .unwrap_or(&[])
    }

    /// Every slide's effective document, in order.
    pub fn all_slides(&self) -> Vec<Arc<SlideDocument>> {
        (0..self.slide_count())
            .filter_map(|position| self.effective_slide_data(position))
            .collect()
    }

    /// Resize rules for the content box at a position.
    pub fn resize_constraint(&self, position: usize) -> ResizeConstraint {
        self.effective_slide_data(position)
            .map(|document| resize_constraint_for(&document))
            .unwrap_or(ResizeConstraint::Free)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Stable identity of the slide at a position.
    pub fn slide_id(&self, position: usize) -> Option<SlideId> {
        self.entry_at(position).map(|entry| entry.id())
    }

    fn entry_at(&self, position: usize) -> Option<SlideEntry> {
        if let Some(list) = &self.deck.slide_list {
            return list.get(position).cloned();
        }
        let originals = self.original_slides.len();
        if position < originals {
            return Some(SlideEntry::Original { index: position });
        }
        let legacy = position - originals;
        self.deck.added_slides.get(legacy).map(|data| SlideEntry::Added {
            id: SlideId::Appended(legacy),
            data: Arc::new(data.clone()),
        })
    }

    /// None if the position is out of range; Some(None) if the slide has no edits.
    fn slide_state_at(&self, position: usize) -> Option<Option<&Arc<SlideEditState>>> {
        let id = self.slide_id(position)?;
        Some(self.deck.slide_state(id))
    }

    // Transitions

    /// Snapshot the current deck and replace it.
    fn commit(&mut self, deck: DeckEditState) {
        self.history.push(self.deck.clone());
        self.deck = Arc::new(deck);
        self.drag = DragState::Idle;
    }

    /// Update one slide's edit state. `update` returns None for a no-op.
    /// Returns whether anything changed.
    fn edit_slide(
        &mut self,
        position: usize,
        quiet: bool,
        update: impl FnOnce(&SlideEditState) -> Option<SlideEditState>,
    ) -> bool {
        let Some(id) = self.slide_id(position) else {
            log::debug!("Edit ignored: no slide at {position}");
            return false;
        };
        let current = self.deck.slide_state(id).map(|s| s.as_ref().clone()).unwrap_or_default();
        let Some(next) = update(&current) else {
            return false;
        };
        if next == current {
            return false;
        }
        let deck = self.deck.with_slide_state(id, |_| next);
        if quiet {
            self.deck = Arc::new(deck);
        } else {
            self.commit(deck);
        }
        true
    }

    /// Replace a block slide's document through `update`. No-op on other slide types.
    fn edit_block_slide(
        &mut self,
        position: usize,
        quiet: bool,
        update: impl FnOnce(&BlockSlide) -> Option<BlockSlide>,
    ) -> bool {
        let Some(document) = self.effective_slide_data(position) else {
            return false;
        };
        let Some(blocks) = document.as_block_slide() else {
            log::debug!("Block edit ignored: slide {position} is not a block slide");
            return false;
        };
        let Some(next) = update(blocks) else {
            return false;
        };
        let next = Arc::new(SlideDocument::Blocks(next));
        self.edit_slide(position, quiet, |s| Some(s.with_override(Some(next))))
    }

    fn set_content_box(&mut self, position: usize, frame: LayoutBox, quiet: bool) {
        if !frame.is_finite() {
            log::debug!("Content box ignored: degenerate frame {frame:?}");
            return;
        }
        self.edit_slide(position, quiet, |s| Some(s.with_content_box(Some(frame))));
    }

    fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        self.selection = None;
        self.active_tool = Tool::Select;
        self.drag = DragState::Idle;
        if !enabled {
            self.pending_template_slide_index = None;
        }
    }

    fn select(&mut self, target: Option<Selection>) {
        match target {
            Some(selection) if selection.slide_index() >= self.slide_count() => {
                log::debug!("Selection ignored: no slide at {}", selection.slide_index());
            }
            other => self.selection = other,
        }
    }

    fn begin_drag(&mut self) {
        if self.drag.is_dragging() {
            return;
        }
        let evicted = self.history.push(self.deck.clone());
        self.drag = DragState::Dragging {
            before: self.deck.clone(),
            evicted,
        };
    }

    /// Revert to the deck at drag start and drop its checkpoint.
    fn cancel_drag(&mut self) {
        if let DragState::Dragging { before, evicted } = std::mem::take(&mut self.drag) {
            log::debug!("Drag cancelled, restoring pre-drag deck");
            self.deck = before;
            self.history.discard_latest();
            if let Some(oldest) = evicted {
                self.history.restore_oldest(oldest);
            }
            self.after_history_jump();
        }
    }

    fn insert_entry(&mut self, position: usize, entry: SlideEntry) -> bool {
        let mut list = self.slide_entries();
        if position > list.len() {
            log::debug!("Insert ignored: position {position} past end ({})", list.len());
            return false;
        }
        list.insert(position, entry);
        let deck = self.deck.with_slide_list(list);
        self.commit(deck);
        self.shift_indices(IndexShift::Insert { at: position });
        log::info!("Inserted slide at {position}");
        true
    }

    fn delete_entry(&mut self, position: usize) {
        let mut list = self.slide_entries();
        if list.len() <= 1 {
            log::debug!("Delete ignored: a deck keeps at least one slide");
            return;
        }
        if position >= list.len() {
            log::debug!("Delete ignored: no slide at {position}");
            return;
        }
        let removed = list.remove(position);
        let deck = self.deck.with_slide_list(list).without_slide_state(removed.id());
        self.commit(deck);
        self.shift_indices(IndexShift::Delete { at: position });
        log::info!("Deleted slide at {position}");
    }

    fn move_entry(&mut self, from: usize, to: usize) {
        let mut list = self.slide_entries();
        if from >= list.len() || to > list.len() {
            log::debug!("Move ignored: {from} -> {to} out of range ({})", list.len());
            return;
        }
        let target = IndexShift::move_target(from, to);
        if target == from {
            return;
        }
        let entry = list.remove(from);
        list.insert(target, entry);
        let deck = self.deck.with_slide_list(list);
        self.commit(deck);
        self.shift_indices(IndexShift::Move { from, to });
        log::info!("Moved slide {from} -> {target}");
    }

    /// Re-address positional state after a structural edit.
    fn shift_indices(&mut self, shift: IndexShift) {
        self.selection = shift.apply_to_selection(self.selection.as_ref());
        self.pending_template_slide_index =
            self.pending_template_slide_index.and_then(|p| shift.apply(p));
        let last = self.slide_count().saturating_sub(1);
        let current = shift.apply(self.current_slide).unwrap_or(self.current_slide);
        self.current_slide = current.min(last);
    }

    /// Drop positional state the restored deck can no longer satisfy.
    fn after_history_jump(&mut self) {
        self.drag = DragState::Idle;
        let count = self.slide_count();
        self.current_slide = self.current_slide.min(count.saturating_sub(1));
        self.pending_template_slide_index =
            self.pending_template_slide_index.filter(|&p| p < count);

        let still_valid = match &self.selection {
            None => true,
            Some(Selection::ContentBox { slide_index }) => *slide_index < count,
            Some(Selection::Overlay {
                slide_index,
                overlay_id,
            }) => self.overlays(*slide_index).iter().any(|o| o.id() == overlay_id),
            Some(Selection::Block {
                slide_index,
                block_id,
            }) => self
                .effective_slide_data(*slide_index)
                .is_some_and(|d| d.as_block_slide().is_some_and(|b| b.block(block_id).is_some())),
        };
        if !still_valid {
            self.selection = None;
        }
    }
}

/// A deep copy of a document for paste/duplicate. Block ids are regenerated
/// so the copy never shares ids with its source.
fn fresh_copy(document: &SlideDocument) -> SlideDocument {
    match document {
        SlideDocument::Blocks(blocks) => SlideDocument::Blocks(blocks.with_fresh_ids()),
        other => other.clone(),
    }
}
