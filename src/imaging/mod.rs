//! Image processing: everything that touches pixels or files.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Greyscale view** | `crop_imm` + `to_luma8` |
//! | **Crop → file** | `crop_imm` + Lanczos3 downsample |
//! | **Reference sheet** | white fill over each region |
//! | **PDF** | `lopdf` single page with image XObjects |
//! | **Preview** | thumbnail on a padded canvas, optional contour filter |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension and unit math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
mod pdf;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    calculate_downsample_dimensions, calculate_thumbnail_dimensions, pixels_to_points,
};
pub use operations::{
    create_crop, create_pdf, create_preview, create_reference_sheet, get_dimensions, plan_preview,
};
pub use params::{CropParams, Divisor, PdfParams, Placement, PreviewParams, ReferenceSheetParams};
pub use rust_backend::RustBackend;
