//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`operations`](super::operations) planners (which
//! decide which files to write and where regions land) and the
//! [`backend`](super::backend) (which does the pixel work). Tests swap in a
//! mock backend and assert on these values without touching pixels.
//!
//! ## Types
//!
//! - [`Divisor`]: integer downsampling factor (≥ 1, default 1). Clamped on construction.
//! - [`CropParams`]: one region cut out of the source and written to its own file.
//! - [`ReferenceSheetParams`]: the source with exported regions filled white.
//! - [`PdfParams`] / [`Placement`]: a single page with every region at its original position.
//! - [`PreviewParams`]: the padded canvas of the current view with region outlines.

use crate::rect::Rect;
use std::path::PathBuf;

/// Integer downsampling factor applied to exported crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Divisor(pub u32);

impl Divisor {
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Divisor {
    fn default() -> Self {
        Self(1)
    }
}

/// Cut `rect` out of `source` and save it to `output`.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Region in full-image pixels.
    pub rect: Rect,
    /// Final pixel size after downsampling.
    pub width: u32,
    pub height: u32,
}

/// Fill every rect in `blanks` with white on a copy of `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSheetParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Regions already grown by the clean margin and clamped to the image.
    pub blanks: Vec<Rect>,
}

/// One embedded image on the PDF page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Region in full-image pixels.
    pub rect: Rect,
    /// Embedded pixel size after downsampling.
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Position and size on the page, in points, origin bottom-left.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Page size in points.
    pub page_width: f64,
    pub page_height: f64,
    pub placements: Vec<Placement>,
}

/// Render the canvas the user would see for the current view.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Visible region in full-image pixels.
    pub region: Rect,
    /// Size the region is rendered at.
    pub thumbnail: (u32, u32),
    /// Padding around the thumbnail on every side.
    pub margin: u32,
    /// Apply an edge (contour) filter to the thumbnail.
    pub contour: bool,
    /// Rectangles to outline, in canvas coordinates.
    pub outlines: Vec<Rect>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_clamps_to_one() {
        assert_eq!(Divisor::new(0).value(), 1);
        assert_eq!(Divisor::new(3).value(), 3);
    }

    #[test]
    fn divisor_default_is_1() {
        assert_eq!(Divisor::default().value(), 1);
    }
}
