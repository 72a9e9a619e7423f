//! High-level image operations.
//!
//! These functions combine calculations with backend execution. Each
//! `plan_*` function is pure and computes the parameters for one backend
//! call; the matching `create_*` function runs it.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{calculate_downsample_dimensions, pixels_to_points};
use super::params::{
    CropParams, Divisor, PdfParams, Placement, PreviewParams, ReferenceSheetParams,
};
use crate::rect::Rect;
use crate::view::ViewState;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

fn rect_size(rect: Rect) -> (u32, u32) {
    (rect.width().max(1) as u32, rect.height().max(1) as u32)
}

/// Plan a single crop without executing it.
pub fn plan_crop(source: &Path, output: &Path, rect: Rect, divisor: Divisor) -> CropParams {
    let (width, height) = calculate_downsample_dimensions(rect_size(rect), divisor.value());
    CropParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        rect,
        width,
        height,
    }
}

/// Write one region to `output`. Returns the written pixel size.
pub fn create_crop(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    rect: Rect,
    divisor: Divisor,
) -> Result<(u32, u32)> {
    let params = plan_crop(source, output, rect, divisor);
    backend.crop(&params)?;
    Ok((params.width, params.height))
}

/// Plan the single-page PDF.
///
/// The page is the whole image at `dpi`; each rect keeps its position, with
/// the y axis flipped to the PDF's bottom-left origin.
pub fn plan_pdf(
    source: &Path,
    output: &Path,
    image: (u32, u32),
    rects: &[Rect],
    dpi: u32,
    divisor: Divisor,
) -> PdfParams {
    let pt = |px: i32| pixels_to_points(i64::from(px), dpi);
    let page_width = pixels_to_points(i64::from(image.0), dpi);
    let page_height = pixels_to_points(i64::from(image.1), dpi);

    let placements = rects
        .iter()
        .map(|&rect| {
            let (pixel_width, pixel_height) =
                calculate_downsample_dimensions(rect_size(rect), divisor.value());
            Placement {
                rect,
                pixel_width,
                pixel_height,
                x: pt(rect.left()),
                y: page_height - pt(rect.bottom()),
                width: pt(rect.width()),
                height: pt(rect.height()),
            }
        })
        .collect();

    PdfParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        page_width,
        page_height,
        placements,
    }
}

pub fn create_pdf(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    image: (u32, u32),
    rects: &[Rect],
    dpi: u32,
    divisor: Divisor,
) -> Result<()> {
    backend.pdf(&plan_pdf(source, output, image, rects, dpi, divisor))
}

/// Plan the reference sheet: every rect grown by `clean_margin` and clamped.
pub fn plan_reference_sheet(
    source: &Path,
    output: &Path,
    image: (u32, u32),
    rects: &[Rect],
    clean_margin: u32,
) -> ReferenceSheetParams {
    ReferenceSheetParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        blanks: rects
            .iter()
            .map(|r| r.expand_margin(clean_margin, image.0, image.1))
            .collect(),
    }
}

pub fn create_reference_sheet(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    image: (u32, u32),
    rects: &[Rect],
    clean_margin: u32,
) -> Result<()> {
    backend.reference_sheet(&plan_reference_sheet(
        source,
        output,
        image,
        rects,
        clean_margin,
    ))
}

/// Plan a canvas preview of `view`. `outlines` are already in canvas
/// coordinates (see `RegionSession::screen_rects`).
pub fn plan_preview(
    source: &Path,
    output: &Path,
    view: &ViewState,
    margin: u32,
    contour: bool,
    outlines: Vec<Rect>,
) -> PreviewParams {
    PreviewParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        region: view.region(),
        thumbnail: view.thumbnail_size(),
        margin,
        contour,
        outlines,
    }
}

pub fn create_preview(backend: &impl ImageBackend, params: &PreviewParams) -> Result<()> {
    backend.preview(params)
}
