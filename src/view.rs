//! The mapping between the displayed thumbnail and the source image.
//!
//! A [`ViewState`] is the visible region of the source (in full-image pixels)
//! together with the size of the thumbnail it is rendered at. Scale factors
//! are derived from those two sizes on every call and never cached, so a
//! zoom followed by an unzoom cannot accumulate drift.

use crate::imaging::calculate_thumbnail_dimensions;
use crate::rect::{Point, Rect, Scale};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    region: Rect,
    thumbnail: (u32, u32),
}

impl ViewState {
    /// View of `region` rendered into a thumbnail that fits `thumbnail_box`.
    pub fn new(region: Rect, thumbnail_box: (u32, u32)) -> Self {
        let size = (
            region.width().max(1) as u32,
            region.height().max(1) as u32,
        );
        Self {
            region,
            thumbnail: calculate_thumbnail_dimensions(size, thumbnail_box),
        }
    }

    /// View of the whole image.
    pub fn identity(image: (u32, u32), thumbnail_box: (u32, u32)) -> Self {
        Self::new(Rect::from_size(image.0, image.1), thumbnail_box)
    }

    /// Visible region in source coordinates.
    pub fn region(&self) -> Rect {
        self.region
    }

    /// Top-left of the visible region in source coordinates.
    pub fn origin(&self) -> Point {
        self.region.top_left()
    }

    /// Visible region size in source pixels.
    pub fn visible_size(&self) -> (u32, u32) {
        (
            self.region.width().max(1) as u32,
            self.region.height().max(1) as u32,
        )
    }

    /// Displayed thumbnail size in screen pixels.
    pub fn thumbnail_size(&self) -> (u32, u32) {
        self.thumbnail
    }

    /// The thumbnail as a rectangle in its own coordinates.
    pub fn thumbnail_rect(&self) -> Rect {
        Rect::from_size(self.thumbnail.0, self.thumbnail.1)
    }

    /// Source pixels per thumbnail pixel, per axis.
    pub fn scale(&self) -> Scale {
        let (vw, vh) = self.visible_size();
        let (tw, th) = self.thumbnail;
        Scale::new(
            f64::from(vw) / f64::from(tw.max(1)),
            f64::from(vh) / f64::from(th.max(1)),
        )
    }
}
