//! Export pipeline: turn the numbered rectangles into files.
//!
//! For a source `photo.jpg` and two regions the default settings write:
//!
//! ```text
//! photo__crop__1.jpg
//! photo__crop__2.jpg
//! ```
//!
//! With `pdf` enabled, `photo.jpg.pdf` holds one page the size of the whole
//! image at the configured DPI, with each region placed where it sits in the
//! source. With `reference_sheet` enabled, `photo__crop__0.jpg` is the
//! source with every region (grown by the clean margin) filled white.
//!
//! All pixel work goes through an [`ImageBackend`], so the pipeline is
//! tested against the mock backend.

use crate::imaging::{
    BackendError, Divisor, ImageBackend, create_crop, create_pdf, create_reference_sheet,
};
use crate::naming::{crop_filename, pdf_filename};
use crate::rect::Rect;
use crate::session::NumberedRect;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No regions to export")]
    Empty,
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
}

/// Sanitized export options.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Crop extension without the dot; `None` keeps the source extension.
    pub format: Option<String>,
    pub dpi: u32,
    pub divisor: Divisor,
    pub clean_margin: u32,
    pub pdf: bool,
    pub reference_sheet: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: None,
            dpi: 300,
            divisor: Divisor::default(),
            clean_margin: 0,
            pdf: false,
            reference_sheet: false,
        }
    }
}

/// One written crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedCrop {
    pub index: usize,
    pub path: PathBuf,
    /// Region in source pixels.
    pub rect: Rect,
    /// Written pixel size, after downsampling.
    pub width: u32,
    pub height: u32,
}

/// Everything an export wrote, in write order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExportReport {
    pub crops: Vec<ExportedCrop>,
    pub pdf: Option<PathBuf>,
    pub reference_sheet: Option<PathBuf>,
}

impl ExportReport {
    /// Total number of files written.
    pub fn file_count(&self) -> usize {
        self.crops.len()
            + usize::from(self.pdf.is_some())
            + usize::from(self.reference_sheet.is_some())
    }
}

/// Write every region of `source` (an image of `image` pixels).
///
/// Fails with [`ExportError::Empty`] when there is nothing to export, and
/// stops at the first backend error; files already written stay on disk.
pub fn export(
    backend: &impl ImageBackend,
    source: &Path,
    image: (u32, u32),
    rects: &[NumberedRect],
    settings: &ExportSettings,
) -> Result<ExportReport, ExportError> {
    if rects.is_empty() {
        return Err(ExportError::Empty);
    }
    let format = settings.format.as_deref();
    let mut report = ExportReport::default();

    for numbered in rects {
        let path = crop_filename(source, numbered.index, format);
        let (width, height) =
            create_crop(backend, source, &path, numbered.rect, settings.divisor)?;
        log::debug!("wrote crop {} {} -> {}", numbered.index, numbered.rect, path.display());
        report.crops.push(ExportedCrop {
            index: numbered.index,
            path,
            rect: numbered.rect,
            width,
            height,
        });
    }

    let regions: Vec<Rect> = rects.iter().map(|n| n.rect).collect();

    if settings.pdf {
        let path = pdf_filename(source);
        create_pdf(
            backend,
            source,
            &path,
            image,
            &regions,
            settings.dpi,
            settings.divisor,
        )?;
        log::debug!("wrote {} at {} dpi", path.display(), settings.dpi);
        report.pdf = Some(path);
    }

    if settings.reference_sheet {
        let path = crop_filename(source, 0, format);
        create_reference_sheet(
            backend,
            source,
            &path,
            image,
            &regions,
            settings.clean_margin,
        )?;
        log::debug!("wrote reference sheet {}", path.display());
        report.reference_sheet = Some(path);
    }

    Ok(report)
}
