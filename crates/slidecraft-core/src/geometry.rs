//! Percent-space boxes and the resize/move math shared by content boxes,
//! blocks and boxed overlays.

use crate::document::{CompareMode, SlideDocument};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest width/height (in percent of the slide canvas) a resize may produce.
pub const MIN_SIZE: f64 = 10.0;

/// An axis-aligned box in percent units (0-100) of the slide canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self::FULL_BLEED
    }
}

impl LayoutBox {
    /// The implicit content box of a slide with no override.
    pub const FULL_BLEED: LayoutBox = LayoutBox {
        x: 0.0,
        y: 0.0,
        width: 100.0,
        height: 100.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box of the given size centered on a point.
    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Aspect ratio (width / height); 1.0 for a degenerate height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height > f64::EPSILON {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.as_rect().contains(point)
    }

    /// Return this box moved by a delta.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Get the box as a kurbo Rect (percent space).
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Build a box from a kurbo Rect, normalizing flipped corners.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

/// Which resize handles a box exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeConstraint {
    /// Eight handles, independent axes.
    Free,
    /// Four corner handles, aspect ratio preserved.
    Proportional,
}

impl ResizeConstraint {
    /// The handles that are legal under this constraint.
    pub fn handles(self) -> &'static [ResizeHandle] {
        match self {
            ResizeConstraint::Free => &ResizeHandle::ALL,
            ResizeConstraint::Proportional => &ResizeHandle::CORNERS,
        }
    }
}

/// A resize handle position on a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::Top,
        ResizeHandle::TopRight,
        ResizeHandle::Right,
        ResizeHandle::BottomRight,
        ResizeHandle::Bottom,
        ResizeHandle::BottomLeft,
        ResizeHandle::Left,
    ];

    pub const CORNERS: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomRight,
        ResizeHandle::BottomLeft,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft
                | ResizeHandle::TopRight
                | ResizeHandle::BottomRight
                | ResizeHandle::BottomLeft
        )
    }

    pub fn moves_left_edge(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Left | ResizeHandle::BottomLeft)
    }

    pub fn moves_right_edge(self) -> bool {
        matches!(self, ResizeHandle::TopRight | ResizeHandle::Right | ResizeHandle::BottomRight)
    }

    pub fn moves_top_edge(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::Top | ResizeHandle::TopRight)
    }

    pub fn moves_bottom_edge(self) -> bool {
        matches!(self, ResizeHandle::BottomLeft | ResizeHandle::Bottom | ResizeHandle::BottomRight)
    }

    /// Position of this handle on a box (percent space).
    pub fn position_on(self, frame: &LayoutBox) -> Point {
        let x = if self.moves_left_edge() {
            frame.x
        } else if self.moves_right_edge() {
            frame.right()
        } else {
            frame.center().x
        };
        let y = if self.moves_top_edge() {
            frame.y
        } else if self.moves_bottom_edge() {
            frame.bottom()
        } else {
            frame.center().y
        };
        Point::new(x, y)
    }
}

/// Pick the resize constraint for a slide document.
///
/// Symmetric diagram engines (concentric, hub-spoke, venn) and quadrant-mode
/// compare slides distort when stretched, so they only resize proportionally.
pub fn resize_constraint_for(document: &SlideDocument) -> ResizeConstraint {
    match document {
        SlideDocument::Concentric(_) | SlideDocument::HubSpoke(_) | SlideDocument::Venn(_) => {
            ResizeConstraint::Proportional
        }
        SlideDocument::Compare(compare) if compare.mode == CompareMode::Quadrant => {
            ResizeConstraint::Proportional
        }
        _ => ResizeConstraint::Free,
    }
}

/// Derive a new box from the box captured at drag start, the active handle and
/// the total pointer delta in percent. Clamped to [`MIN_SIZE`].
pub fn apply_resize(
    start: LayoutBox,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    constraint: ResizeConstraint,
) -> LayoutBox {
    apply_resize_clamped(start, handle, dx, dy, constraint, MIN_SIZE)
}

/// [`apply_resize`] with an explicit minimum size.
pub fn apply_resize_clamped(
    start: LayoutBox,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    constraint: ResizeConstraint,
    min_size: f64,
) -> LayoutBox {
    if !dx.is_finite() || !dy.is_finite() || !start.is_finite() {
        return start;
    }
    match constraint {
        ResizeConstraint::Free => resize_free(start, handle, dx, dy, min_size),
        ResizeConstraint::Proportional => {
            if !handle.is_corner() {
                return start;
            }
            resize_proportional(start, handle, dx, min_size)
        }
    }
}

fn resize_free(
    start: LayoutBox,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    min_size: f64,
) -> LayoutBox {
    let mut frame = start;

    if handle.moves_left_edge() {
        frame.x += dx;
        frame.width -= dx;
    } else if handle.moves_right_edge() {
        frame.width += dx;
    }

    if handle.moves_top_edge() {
        frame.y += dy;
        frame.height -= dy;
    } else if handle.moves_bottom_edge() {
        frame.height += dy;
    }

    if frame.width < min_size {
        frame.width = min_size;
        if handle.moves_left_edge() {
            frame.x = start.right() - min_size;
        }
    }
    if frame.height < min_size {
        frame.height = min_size;
        if handle.moves_top_edge() {
            frame.y = start.bottom() - min_size;
        }
    }
    frame
}

fn resize_proportional(
    start: LayoutBox,
    handle: ResizeHandle,
    dx: f64,
    min_size: f64,
) -> LayoutBox {
    let aspect = start.aspect_ratio();
    let width_delta = if handle.moves_left_edge() { -dx } else { dx };

    // Both axes must stay at or above the minimum without breaking the ratio.
    let min_width = min_size.max(min_size * aspect);
    let width = (start.width + width_delta).max(min_width);
    let height = width / aspect;

    // The corner opposite the dragged one stays fixed.
    let x = if handle.moves_left_edge() {
        start.right() - width
    } else {
        start.x
    };
    let y = if handle.moves_top_edge() {
        start.bottom() - height
    } else {
        start.y
    };
    LayoutBox::new(x, y, width, height)
}

/// Move a box captured at drag start by the total pointer delta in percent.
pub fn apply_move(start: LayoutBox, dx: f64, dy: f64) -> LayoutBox {
    if !dx.is_finite() || !dy.is_finite() {
        return start;
    }
    start.translated(Vec2::new(dx, dy))
}

/// Convert a pointer delta in pixels into percent of the container's size.
/// Returns None for a degenerate container.
pub fn pointer_delta_percent(start: Point, current: Point, container: Size) -> Option<Vec2> {
    if container.width <= 0.0 || container.height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (current.x - start.x) / container.width * 100.0,
        (current.y - start.y) / container.height * 100.0,
    ))
}

/// Convert a pointer position in pixels into percent coordinates of a container rect.
pub fn pointer_to_percent(pointer: Point, container: Rect) -> Option<Point> {
    if container.width() <= 0.0 || container.height() <= 0.0 {
        return None;
    }
    Some(Point::new(
        (pointer.x - container.x0) / container.width() * 100.0,
        (pointer.y - container.y0) / container.height() * 100.0,
    ))
}
