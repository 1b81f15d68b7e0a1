//! Geometry primitives shared by the grid system, calculators and validator.
//! Every length is in canvas units.

use serde::{Deserialize, Serialize};

/// Tolerance for float comparisons on canvas coordinates.
pub const EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when `other` lies entirely inside `self` (within `EPSILON`).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Area shared by two rectangles; zero when they only touch.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= EPSILON || h <= EPSILON {
            0.0
        } else {
            w * h
        }
    }

    pub fn inset(&self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        Rect::new(
            self.x + left,
            self.y + top,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Absolute placement of one content block on the canvas.
///
/// Invariant: the box lies inside the canvas unless `overflowing` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPosition {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    pub alignment: Alignment,
    pub vertical_alignment: VerticalAlignment,
    #[serde(default)]
    pub overflowing: bool,
}

impl ElementPosition {
    pub fn new(rect: Rect, alignment: Alignment, vertical_alignment: VerticalAlignment) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            z_index: None,
            alignment,
            vertical_alignment,
            overflowing: false,
        }
    }

    pub fn top_left(rect: Rect) -> Self {
        Self::new(rect, Alignment::Left, VerticalAlignment::Top)
    }

    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = Some(z);
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// `x ≥ 0, y ≥ 0, x + width ≤ canvas_width, y + height ≤ canvas_height`.
    pub fn within_canvas(&self, canvas_width: f32, canvas_height: f32) -> bool {
        Rect::new(0.0, 0.0, canvas_width, canvas_height).contains(&self.rect())
    }
}
