//! Tool system: turns canvas clicks, keys and drags into editor actions.

use crate::action::Action;
use crate::block::ContentBlock;
use crate::drag::{MoveSession, ResizeSession};
use crate::editor::EditorState;
use crate::geometry::{LayoutBox, ResizeConstraint, ResizeHandle, resize_constraint_for};
use crate::overlay::OverlayElement;
use crate::selection::Selection;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Text,
    Rect,
    Line,
}

impl Tool {
    /// Drawing tools create overlays instead of selecting content.
    pub fn is_drawing(self) -> bool {
        !matches!(self, Tool::Select)
    }
}

/// Keys the editor reacts to outside text editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Delete,
    Backspace,
    Escape,
}

/// Action for a click at `point` (percent space) on a slide.
///
/// Text and rect tools create a default overlay there; the line tool is a drag
/// gesture handled by [`crate::drag::LineDraft`], so a plain click does nothing.
pub fn click_action(state: &EditorState, slide: usize, point: Point) -> Option<Action> {
    if slide >= state.slide_count() {
        return None;
    }
    match state.active_tool {
        Tool::Text => Some(Action::AddOverlay {
            slide,
            overlay: OverlayElement::text_at(point, &state.active_color),
        }),
        Tool::Rect => Some(Action::AddOverlay {
            slide,
            overlay: OverlayElement::rect_at(point, &state.active_color),
        }),
        Tool::Line => None,
        Tool::Select => Some(Action::Select {
            target: hit_target(state, slide, point),
        }),
    }
}

/// What a select-tool click at `point` lands on: the topmost overlay, then a
/// block, then the content box.
pub fn hit_target(state: &EditorState, slide: usize, point: Point) -> Option<Selection> {
    let tolerance = state.config.hit_tolerance;
    let overlays = state.overlays(slide);
    if let Some(overlay) = overlays.iter().rev().find(|o| o.hit_test(point, tolerance)) {
        return Some(Selection::Overlay {
            slide_index: slide,
            overlay_id: overlay.id().to_string(),
        });
    }

    let document = state.effective_slide_data(slide)?;
    if let Some(blocks) = document.as_block_slide() {
        return blocks.block_at(point).map(|block| Selection::Block {
            slide_index: slide,
            block_id: block.id.clone(),
        });
    }

    state
        .content_box(slide)
        .filter(|frame| frame.contains(point))
        .map(|_| Selection::ContentBox { slide_index: slide })
}

/// Action for a key press. Delete/Backspace remove the selected overlay or
/// block; nothing happens while a text field has focus.
pub fn key_action(state: &EditorState, key: EditorKey, text_editing: bool) -> Option<Action> {
    if text_editing || !state.edit_mode {
        return None;
    }
    match key {
        EditorKey::Escape => state.selection.as_ref().map(|_| Action::Select { target: None }),
        EditorKey::Delete | EditorKey::Backspace => match state.selection.as_ref()? {
            Selection::Overlay {
                slide_index,
                overlay_id,
            } => Some(Action::RemoveOverlay {
                slide: *slide_index,
                overlay_id: overlay_id.clone(),
            }),
            Selection::Block {
                slide_index,
                block_id,
            } => Some(Action::RemoveBlock {
                slide: *slide_index,
                block_id: block_id.clone(),
            }),
            Selection::ContentBox { .. } => None,
        },
    }
}

/// Current box of a selection target.
pub fn selected_frame(state: &EditorState, selection: &Selection) -> Option<LayoutBox> {
    match selection {
        Selection::ContentBox { slide_index } => state.content_box(*slide_index),
        Selection::Block {
            slide_index,
            block_id,
        } => selected_block(state, *slide_index, block_id).map(|block| block.frame),
        Selection::Overlay {
            slide_index,
            overlay_id,
        } => selected_overlay(state, *slide_index, overlay_id).map(|o| o.bounds()),
    }
}

/// Resize rules for a selection target.
pub fn selected_constraint(state: &EditorState, selection: &Selection) -> ResizeConstraint {
    match selection {
        Selection::ContentBox { slide_index } => state.resize_constraint(*slide_index),
        Selection::Block {
            slide_index,
            block_id,
        } => match selected_block(state, *slide_index, block_id) {
            Some(ContentBlock {
                data: crate::block::BlockData::Diagram { document },
                ..
            }) => resize_constraint_for(&document),
            _ => ResizeConstraint::Free,
        },
        Selection::Overlay { .. } => ResizeConstraint::Free,
    }
}

/// Start moving the selected target. None if the target is gone.
pub fn begin_move(
    state: &EditorState,
    selection: &Selection,
    pointer: Point,
    container: Size,
) -> Option<MoveSession> {
    let frame = selected_frame(state, selection)?;
    Some(MoveSession::new(pointer, container, frame))
}

/// Start resizing the selected target. None if the target is gone, is a line,
/// or the handle isn't legal under its constraint.
pub fn begin_resize(
    state: &EditorState,
    selection: &Selection,
    handle: ResizeHandle,
    pointer: Point,
    container: Size,
) -> Option<ResizeSession> {
    if let Selection::Overlay {
        slide_index,
        overlay_id,
    } = selection
    {
        let overlay = selected_overlay(state, *slide_index, overlay_id);
        if matches!(overlay, Some(OverlayElement::Line(_))) {
            return None;
        }
    }
    let frame = selected_frame(state, selection)?;
    let constraint = selected_constraint(state, selection);
    if !constraint.handles().contains(&handle) {
        return None;
    }
    let session = ResizeSession::new(pointer, container, frame, handle, constraint);
    Some(session.with_min_size(state.config.min_size))
}

/// The quiet update that places a selection target at `frame`.
///
/// Lines keep their shape and are translated by the change of their bounds.
pub fn frame_update_action(
    state: &EditorState,
    selection: &Selection,
    frame: LayoutBox,
) -> Option<Action> {
    match selection {
        Selection::ContentBox { slide_index } => Some(Action::SetContentBoxQuiet {
            slide: *slide_index,
            frame,
        }),
        Selection::Block {
            slide_index,
            block_id,
        } => {
            let block = selected_block(state, *slide_index, block_id)?;
            Some(Action::UpdateBlockQuiet {
                slide: *slide_index,
                block: block.with_frame(frame),
            })
        }
        Selection::Overlay {
            slide_index,
            overlay_id,
        } => {
            let overlay = selected_overlay(state, *slide_index, overlay_id)?;
            let updated = match overlay {
                OverlayElement::Line(_) => {
                    let bounds = overlay.bounds();
                    overlay.translated(Vec2::new(frame.x - bounds.x, frame.y - bounds.y))
                }
                _ => overlay.with_frame(frame),
            };
            Some(Action::UpdateOverlayQuiet {
                slide: *slide_index,
                overlay: updated,
            })
        }
    }
}

fn selected_block(state: &EditorState, slide: usize, id: &str) -> Option<ContentBlock> {
    let document = state.effective_slide_data(slide)?;
    document.as_block_slide()?.block(id).cloned()
}

fn selected_overlay<'a>(
    state: &'a EditorState,
    slide: usize,
    id: &str,
) -> Option<&'a OverlayElement> {
    state.overlays(slide).iter().find(|o| o.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockData, BlockSlide};
    use crate::document::{SlideDocument, TitleSlide};

    fn editor() -> EditorState {
        let mut state = EditorState::new(vec![SlideDocument::Title(TitleSlide::new("Intro"))]);
        state.dispatch(Action::SetEditMode { enabled: true });
        state
    }

    #[test]
    fn test_drawing_tool_creates_overlay() {
        let mut state = editor();
        state.dispatch(Action::SetTool { tool: Tool::Rect });
        let action = click_action(&state, 0, Point::new(30.0, 30.0)).unwrap();
        state.dispatch(action);
        assert_eq!(state.overlays(0).len(), 1);
        assert!(matches!(state.selection, Some(Selection::Overlay { .. })));
    }

    #[test]
    fn test_line_click_does_nothing() {
        let mut state = editor();
        state.dispatch(Action::SetTool { tool: Tool::Line });
        assert!(click_action(&state, 0, Point::new(30.0, 30.0)).is_none());
    }

    #[test]
    fn test_select_prefers_overlay_over_content() {
        let mut state = editor();
        let overlay = OverlayElement::rect_at(Point::new(50.0, 50.0), "#000");
        let id = overlay.id().to_string();
        state.dispatch(Action::AddOverlay { slide: 0, overlay });
        state.dispatch(Action::Select { target: None });

        let hit = hit_target(&state, 0, Point::new(50.0, 50.0)).unwrap();
        assert!(hit.is_overlay(0, &id));
        assert_eq!(
            hit_target(&state, 0, Point::new(5.0, 5.0)),
            Some(Selection::ContentBox { slide_index: 0 })
        );

        state.dispatch(Action::SetContentBox {
            slide: 0,
            frame: LayoutBox::new(20.0, 20.0, 20.0, 20.0),
        });
        assert_eq!(hit_target(&state, 0, Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_select_hits_blocks() {
        let doc = SlideDocument::Blocks(BlockSlide {
            title: String::new(),
            blocks: vec![ContentBlock {
                id: "b1".into(),
                frame: LayoutBox::new(0.0, 0.0, 50.0, 50.0),
                data: BlockData::text("x"),
            }],
        });
        let state = EditorState::new(vec![doc]);
        let hit = hit_target(&state, 0, Point::new(10.0, 10.0)).unwrap();
        assert!(hit.is_block(0, "b1"));
        assert_eq!(hit_target(&state, 0, Point::new(80.0, 80.0)), None);
    }

    #[test]
    fn test_delete_key_respects_text_editing() {
        let mut state = editor();
        state.dispatch(Action::AddOverlay {
            slide: 0,
            overlay: OverlayElement::text_at(Point::new(50.0, 50.0), "#000"),
        });
        assert!(key_action(&state, EditorKey::Delete, true).is_none());

        let action = key_action(&state, EditorKey::Backspace, false).unwrap();
        state.dispatch(action);
        assert!(state.overlays(0).is_empty());
        assert!(state.selection.is_none());
    }

    #[test]
    fn test_drag_gesture_is_one_undo_step() {
        let mut state = editor();
        let selection = Selection::ContentBox { slide_index: 0 };
        let session = begin_resize(
            &state,
            &selection,
            ResizeHandle::BottomRight,
            Point::new(1000.0, 500.0),
            Size::new(1000.0, 500.0),
        )
        .unwrap();

        state.dispatch(Action::BeginDrag);
        for step in 1..=20 {
            let pointer = Point::new(1000.0 - step as f64 * 10.0, 500.0 - step as f64 * 5.0);
            let frame = session.frame_at(pointer);
            let action = frame_update_action(&state, &selection, frame).unwrap();
            state.dispatch(action);
        }
        state.dispatch(Action::EndDrag);
        let frame = state.content_box(0).unwrap();
        assert!((frame.width - 80.0).abs() < 1e-9);
        assert!((frame.height - 80.0).abs() < 1e-9);
        assert_eq!((frame.x, frame.y), (0.0, 0.0));

        state.undo();
        assert_eq!(state.content_box(0), Some(LayoutBox::FULL_BLEED));
    }

    #[test]
    fn test_line_overlay_moves_by_bounds() {
        let mut state = editor();
        let line =
            OverlayElement::line_between(Point::new(10.0, 10.0), Point::new(30.0, 20.0), "#000");
        let id = line.id().to_string();
        state.dispatch(Action::AddOverlay {
            slide: 0,
            overlay: line,
        });
        let selection = Selection::Overlay {
            slide_index: 0,
            overlay_id: id,
        };
        let container = Size::new(100.0, 100.0);
        let handle = ResizeHandle::Right;
        assert!(begin_resize(&state, &selection, handle, Point::ZERO, container).is_none());

        let session = begin_move(&state, &selection, Point::ZERO, container).unwrap();
        let frame = session.frame_at(Point::new(5.0, 5.0));
        let action = frame_update_action(&state, &selection, frame).unwrap();
        state.dispatch(action);
        match &state.overlays(0)[0] {
            OverlayElement::Line(l) => {
                assert_eq!((l.x1, l.y1, l.x2, l.y2), (15.0, 15.0, 35.0, 25.0))
            }
            other => panic!("Expected line, got {other:?}"),
        }
    }
}
