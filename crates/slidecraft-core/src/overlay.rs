//! Freeform overlays (text, rectangle, line) layered above a slide's content.

use crate::geometry::{LayoutBox, ResizeConstraint, ResizeHandle, apply_resize};
use crate::id::generate_id;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Identifier of an overlay within its slide.
pub type OverlayId = String;

/// Generate a fresh overlay id.
pub fn next_overlay_id() -> OverlayId {
    generate_id("ov")
}

/// Default size of a new text overlay (percent).
pub const DEFAULT_TEXT_SIZE: (f64, f64) = (30.0, 10.0);
/// Default size of a new rectangle overlay (percent).
pub const DEFAULT_RECT_SIZE: (f64, f64) = (20.0, 15.0);
/// Default font size of a new text overlay (px at 100% zoom).
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Font weights offered for text overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    #[default]
    Regular,
    Semibold,
    Bold,
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => 400,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            400 => Ok(FontWeight::Regular),
            600 => Ok(FontWeight::Semibold),
            700 => Ok(FontWeight::Bold),
            other => Err(format!("unsupported font weight {other}, expected 400, 600 or 700")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: OverlayId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub text: String,
    pub font_size: f64,
    pub color: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectOverlay {
    pub id: OverlayId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default)]
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOverlay {
    pub id: OverlayId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

/// Which end of a line overlay is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnd {
    Start,
    End,
}

/// An annotation layered above the slide content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverlayElement {
    Text(TextOverlay),
    Rect(RectOverlay),
    Line(LineOverlay),
}

impl OverlayElement {
    /// A default text overlay centered at a point.
    pub fn text_at(center: Point, color: &str) -> Self {
        let frame = LayoutBox::centered_at(center, DEFAULT_TEXT_SIZE.0, DEFAULT_TEXT_SIZE.1);
        OverlayElement::Text(TextOverlay {
            id: next_overlay_id(),
            x: frame.x,
            y: frame.y,
            w: frame.width,
            h: frame.height,
            text: "Text".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: color.to_string(),
            font_weight: FontWeight::Regular,
            align: TextAlign::Left,
        })
    }

    /// A default rectangle overlay centered at a point.
    pub fn rect_at(center: Point, color: &str) -> Self {
        let frame = LayoutBox::centered_at(center, DEFAULT_RECT_SIZE.0, DEFAULT_RECT_SIZE.1);
        OverlayElement::Rect(RectOverlay {
            id: next_overlay_id(),
            x: frame.x,
            y: frame.y,
            w: frame.width,
            h: frame.height,
            fill: color.to_string(),
            stroke: "none".to_string(),
            stroke_width: 0.0,
            radius: 0.0,
        })
    }

    pub fn line_between(start: Point, end: Point, color: &str) -> Self {
        OverlayElement::Line(LineOverlay {
            id: next_overlay_id(),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            stroke: color.to_string(),
            stroke_width: 2.0,
        })
    }

    pub fn id(&self) -> &str {
        match self {
            OverlayElement::Text(t) => &t.id,
            OverlayElement::Rect(r) => &r.id,
            OverlayElement::Line(l) => &l.id,
        }
    }

    /// Bounding box in percent space.
    pub fn bounds(&self) -> LayoutBox {
        match self {
            OverlayElement::Text(t) => LayoutBox::new(t.x, t.y, t.w, t.h),
            OverlayElement::Rect(r) => LayoutBox::new(r.x, r.y, r.w, r.h),
            OverlayElement::Line(l) => {
                LayoutBox::from_rect(kurbo::Rect::new(l.x1, l.y1, l.x2, l.y2))
            }
        }
    }

    /// Check if a point (percent space) hits this overlay.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            OverlayElement::Line(l) => {
                let (start, end) = (Point::new(l.x1, l.y1), Point::new(l.x2, l.y2));
                let dist = point_to_segment_dist(point, start, end);
                dist <= tolerance + l.stroke_width / 2.0
            }
            _ => self.bounds().as_rect().inflate(tolerance, tolerance).contains(point),
        }
    }

    /// A copy moved by a delta (percent).
    pub fn translated(&self, delta: Vec2) -> Self {
        let mut moved = self.clone();
        match &mut moved {
            OverlayElement::Text(t) => {
                t.x += delta.x;
                t.y += delta.y;
            }
            OverlayElement::Rect(r) => {
                r.x += delta.x;
                r.y += delta.y;
            }
            OverlayElement::Line(l) => {
                l.x1 += delta.x;
                l.y1 += delta.y;
                l.x2 += delta.x;
                l.y2 += delta.y;
            }
        }
        moved
    }

    /// A copy with its box replaced. Lines are left untouched; use
    /// [`OverlayElement::with_line_end`] for them.
    pub fn with_frame(&self, frame: LayoutBox) -> Self {
        let mut resized = self.clone();
        match &mut resized {
            OverlayElement::Text(t) => {
                (t.x, t.y, t.w, t.h) = (frame.x, frame.y, frame.width, frame.height);
            }
            OverlayElement::Rect(r) => {
                (r.x, r.y, r.w, r.h) = (frame.x, frame.y, frame.width, frame.height);
            }
            OverlayElement::Line(_) => {}
        }
        resized
    }

    /// A copy resized from `start` by a handle drag, using free 8-handle rules.
    pub fn resized(&self, start: LayoutBox, handle: ResizeHandle, delta: Vec2) -> Self {
        self.with_frame(apply_resize(start, handle, delta.x, delta.y, ResizeConstraint::Free))
    }

    /// A copy of a line with one endpoint moved to a point. No-op for boxed overlays.
    pub fn with_line_end(&self, end: LineEnd, point: Point) -> Self {
        let mut moved = self.clone();
        if let OverlayElement::Line(l) = &mut moved {
            match end {
                LineEnd::Start => (l.x1, l.y1) = (point.x, point.y),
                LineEnd::End => (l.x2, l.y2) = (point.x, point.y),
            }
        }
        moved
    }

    /// Give the overlay a new id, for pasted or duplicated content.
    pub fn regenerate_id(&mut self) {
        let id = next_overlay_id();
        match self {
            OverlayElement::Text(t) => t.id = id,
            OverlayElement::Rect(r) => r.id = id,
            OverlayElement::Line(l) => l.id = id,
        }
    }
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}
