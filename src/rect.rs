//! Axis-aligned integer rectangles and the coordinate transforms between
//! screen (thumbnail canvas) space and full-resolution source space.
//!
//! A [`Rect`] is always normalized: `left <= right` and `top <= bottom`.
//! Every operation returns a new rectangle; nothing mutates in place.
//!
//! ## Coordinate spaces
//!
//! ```text
//! canvas ──(- margin, × scale)──▶ view-local ──(+ origin)──▶ source
//!        ◀─(÷ scale, + margin)─── (- origin) ◀─────────────
//! ```
//!
//! The canvas pads the thumbnail by a fixed margin on every side, so canvas
//! coordinate `margin` corresponds to the first thumbnail pixel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in either screen or source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-axis ratio of source pixels to thumbnail pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn identity() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// How fractional coordinates become integer pixels.
///
/// - `HalfUp`: `floor(x + 0.5)`. Ties round towards positive infinity, also
///   for negative values (`-2.5` → `-2`).
/// - `Truncate`: drop the fraction (round towards zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rounding {
    #[default]
    HalfUp,
    Truncate,
}

impl Rounding {
    pub fn apply(self, value: f64) -> i32 {
        match self {
            Rounding::HalfUp => (value + 0.5).floor() as i32,
            Rounding::Truncate => value.trunc() as i32,
        }
    }
}

/// Normalized axis-aligned rectangle with integer edges.
///
/// `width` and `height` are derived from the edges, so they can never drift
/// out of sync. A rectangle may be degenerate (zero width or height); callers
/// that need a minimum size must check [`Rect::min_side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Rect {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Rect {
    /// Build from edges in any order; swapped edges are normalized.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Normalize two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, to_i32(width), to_i32(height))
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Saturates at `i32::MAX` for rectangles spanning the whole `i32` range.
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> i32 {
        self.width().min(self.height())
    }

    pub fn is_degenerate(&self) -> bool {
        self.min_side() <= 0
    }

    /// Intersect with `bounds` shifted by `offset` on both axes.
    ///
    /// `bounds` is the thumbnail rectangle in its own coordinates; `offset` is
    /// where the thumbnail sits on the padded canvas. Returns `None` when the
    /// two do not overlap at all. Touching edges produce a degenerate
    /// rectangle, which callers reject by size.
    pub fn clip_to(&self, bounds: Rect, offset: i32) -> Option<Rect> {
        let left = self.left.max(bounds.left + offset);
        let top = self.top.max(bounds.top + offset);
        let right = self.right.min(bounds.right + offset);
        let bottom = self.bottom.min(bounds.bottom + offset);
        if right < left || bottom < top {
            return None;
        }
        Some(Rect {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Map a canvas rectangle to view-local source coordinates.
    ///
    /// Each edge has the canvas `margin` removed, is multiplied by the
    /// per-axis scale and rounded with `rounding`.
    pub fn scale_to_source(&self, scale: Scale, margin: i32, rounding: Rounding) -> Rect {
        let map = |v: i32, s: f64| rounding.apply(f64::from(v - margin) * s);
        Rect::new(
            map(self.left, scale.x),
            map(self.top, scale.y),
            map(self.right, scale.x),
            map(self.bottom, scale.y),
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Inverse of [`scale_to_source`](Self::scale_to_source) followed by
    /// [`translate`](Self::translate): maps a source rectangle back onto the
    /// canvas of the current view.
    pub fn project_to_screen(
        &self,
        scale: Scale,
        origin: Point,
        margin: i32,
        rounding: Rounding,
    ) -> Rect {
        let map = |v: i32, o: i32, s: f64| rounding.apply(f64::from(v - o) / s + f64::from(margin));
        Rect::new(
            map(self.left, origin.x, scale.x),
            map(self.top, origin.y, scale.y),
            map(self.right, origin.x, scale.x),
            map(self.bottom, origin.y, scale.y),
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Clamp into a `width × height` image.
    ///
    /// `left`/`top` land in `[0, W-1]`/`[0, H-1]`, `right`/`bottom` in
    /// `[1, W]`/`[1, H]`. A rectangle lying entirely outside collapses onto a
    /// one-pixel strip along the nearest edge, and a zero-size rectangle is
    /// widened to one pixel, so the result always has positive area. Zero
    /// image dimensions are treated as 1.
    pub fn clamp_to_image(&self, width: u32, height: u32) -> Rect {
        let w = to_i32(width.max(1));
        let h = to_i32(height.max(1));
        let left = self.left.clamp(0, w - 1);
        let top = self.top.clamp(0, h - 1);
        let right = self.right.clamp(1, w).max(left + 1);
        let bottom = self.bottom.clamp(1, h).max(top + 1);
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Grow every edge outward by `margin`, then clamp into the image.
    pub fn expand_margin(&self, margin: u32, width: u32, height: u32) -> Rect {
        let m = to_i32(margin);
        Rect {
            left: self.left.saturating_sub(m),
            top: self.top.saturating_sub(m),
            right: self.right.saturating_add(m),
            bottom: self.bottom.saturating_add(m),
        }
        .clamp_to_image(width, height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

pub(crate) fn to_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
