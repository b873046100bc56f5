//! Pointer gestures: move/resize sessions, line drafts and the drag sub-state.
//!
//! Sessions capture everything at pointer-down and derive each frame from the
//! total delta, so repeated frames never accumulate rounding drift.

use crate::deck::DeckEditState;
use crate::geometry::{
    LayoutBox, MIN_SIZE, ResizeConstraint, ResizeHandle, apply_move, apply_resize_clamped,
    pointer_delta_percent,
};
use crate::overlay::OverlayElement;
use kurbo::{Point, Size, Vec2};
use std::sync::Arc;

/// Whether a pointer gesture is in progress.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A gesture is running. `before` is the deck at pointer-down and
    /// `evicted` the oldest undo state its checkpoint pushed out, if any.
    Dragging {
        before: Arc<DeckEditState>,
        evicted: Option<Arc<DeckEditState>>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// State of an active move of a box (content box, block or overlay).
#[derive(Debug, Clone)]
pub struct MoveSession {
    /// Pointer position at drag start, in pixels.
    pub start_pointer: Point,
    /// Container size in pixels, captured at drag start.
    pub container: Size,
    /// Box at drag start.
    pub start_frame: LayoutBox,
}

impl MoveSession {
    pub fn new(start_pointer: Point, container: Size, start_frame: LayoutBox) -> Self {
        Self {
            start_pointer,
            container,
            start_frame,
        }
    }

    /// Total drag delta in percent. Zero for a degenerate container.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer_delta_percent(self.start_pointer, pointer, self.container).unwrap_or(Vec2::ZERO)
    }

    pub fn frame_at(&self, pointer: Point) -> LayoutBox {
        let delta = self.delta(pointer);
        apply_move(self.start_frame, delta.x, delta.y)
    }
}

/// State of an active resize through one handle.
#[derive(Debug, Clone)]
pub struct ResizeSession {
    /// Pointer position at drag start, in pixels.
    pub start_pointer: Point,
    /// Container size in pixels, captured at drag start.
    pub container: Size,
    /// Box at drag start.
    pub start_frame: LayoutBox,
    /// The handle being dragged.
    pub handle: ResizeHandle,
    pub constraint: ResizeConstraint,
    pub min_size: f64,
}

impl ResizeSession {
    pub fn new(
        start_pointer: Point,
        container: Size,
        start_frame: LayoutBox,
        handle: ResizeHandle,
        constraint: ResizeConstraint,
    ) -> Self {
        Self {
            start_pointer,
            container,
            start_frame,
            handle,
            constraint,
            min_size: MIN_SIZE,
        }
    }

    pub fn with_min_size(mut self, min_size: f64) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn frame_at(&self, pointer: Point) -> LayoutBox {
        let Some(delta) = pointer_delta_percent(self.start_pointer, pointer, self.container) else {
            return self.start_frame;
        };
        apply_resize_clamped(
            self.start_frame,
            self.handle,
            delta.x,
            delta.y,
            self.constraint,
            self.min_size,
        )
    }
}

/// A line being drawn with the line tool. Lives outside the editor state until committed.
#[derive(Debug, Clone)]
pub struct LineDraft {
    /// Start point in percent.
    pub start: Point,
    /// Latest pointer position in percent.
    pub current: Point,
}

impl LineDraft {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, point: Point) {
        self.current = point;
    }

    pub fn length(&self) -> f64 {
        (self.current - self.start).hypot()
    }

    /// Endpoints for the live preview.
    pub fn preview(&self) -> (Point, Point) {
        (self.start, self.current)
    }

    /// The overlay to add on pointer-up, or None for a too-short line.
    pub fn commit(&self, color: &str, min_length: f64) -> Option<OverlayElement> {
        if !self.length().is_finite() || self.length() < min_length {
            log::debug!("Discarding line draft of length {:.2}", self.length());
            return None;
        }
        Some(OverlayElement::line_between(self.start, self.current, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_uses_total_delta() {
        let session = MoveSession::new(
            Point::new(100.0, 100.0),
            Size::new(1000.0, 500.0),
            LayoutBox::new(10.0, 10.0, 40.0, 40.0),
        );
        // Many intermediate frames must not affect the result.
        for x in 100..400 {
            let _ = session.frame_at(Point::new(x as f64, 100.0));
        }
        let frame = session.frame_at(Point::new(200.0, 150.0));
        assert!((frame.x - 20.0).abs() < 1e-9);
        assert!((frame.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_container_keeps_start() {
        let start = LayoutBox::new(10.0, 10.0, 40.0, 40.0);
        let session = ResizeSession::new(
            Point::ZERO,
            Size::ZERO,
            start,
            ResizeHandle::BottomRight,
            ResizeConstraint::Free,
        );
        assert_eq!(session.frame_at(Point::new(50.0, 50.0)), start);
    }

    #[test]
    fn test_resize_respects_min_size() {
        let start = LayoutBox::new(10.0, 10.0, 40.0, 40.0);
        let session = ResizeSession::new(
            Point::ZERO,
            Size::new(100.0, 100.0),
            start,
            ResizeHandle::TopLeft,
            ResizeConstraint::Free,
        );
        let frame = session.frame_at(Point::new(80.0, 80.0));
        assert_eq!(frame.width, MIN_SIZE);
        assert_eq!(frame.height, MIN_SIZE);
        assert!((frame.right() - start.right()).abs() < 1e-9);
        assert!((frame.bottom() - start.bottom()).abs() < 1e-9);
    }

    #[test]
    fn test_line_draft_requires_min_length() {
        let mut draft = LineDraft::new(Point::new(10.0, 10.0));
        draft.update(Point::new(10.5, 10.0));
        assert!(draft.commit("#000", 1.0).is_none());

        draft.update(Point::new(30.0, 10.0));
        assert_eq!(draft.preview(), (Point::new(10.0, 10.0), Point::new(30.0, 10.0)));
        let line = draft.commit("#000", 1.0).unwrap();
        assert!(matches!(line, OverlayElement::Line(_)));
    }
}
