//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the geometry core and
//! actual pixels: identify a source, hand out a greyscale view for
//! auto-detection, and write the export artifacts (crops, reference sheet,
//! PDF) and canvas previews.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate and `lopdf`.

use super::params::{CropParams, PdfParams, PreviewParams, ReferenceSheetParams};
use crate::rect::Rect;
use image::GrayImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// Every backend implements all operations so the session and export code
/// stay backend-agnostic.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Greyscale pixels of `region` (full-image coordinates), at full resolution.
    fn load_luma(&self, path: &Path, region: Rect) -> Result<GrayImage, BackendError>;

    /// Write one cropped region.
    fn crop(&self, params: &CropParams) -> Result<(), BackendError>;

    /// Write the source with regions whited out.
    fn reference_sheet(&self, params: &ReferenceSheetParams) -> Result<(), BackendError>;

    /// Write the single-page PDF.
    fn pdf(&self, params: &PdfParams) -> Result<(), BackendError>;

    /// Write the view canvas with region outlines.
    fn preview(&self, params: &PreviewParams) -> Result<(), BackendError>;
}
