//! Pure Rust image backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Downsample / thumbnail | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Contour preview | `image::DynamicImage::filter3x3` (Laplacian) + `invert` |
//! | White-out | `image::GenericImage::put_pixel` |
//! | PDF | `lopdf` (see [`super::pdf`]) |
//!
//! Every operation decodes the source afresh; sessions are interactive and
//! export happens once, so there is no decode cache.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{CropParams, PdfParams, PreviewParams, ReferenceSheetParams};
use super::pdf::{PlacedImage, write_pdf};
use crate::rect::Rect;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImage, GrayImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Canvas padding color, a neutral light grey.
const CANVAS_BACKGROUND: Rgb<u8> = Rgb([217, 217, 217]);
const OUTLINE_COLOR: Rgb<u8> = Rgb([220, 20, 20]);
const OUTLINE_WIDTH: i32 = 2;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Cut a region out, clamped so it always lies inside the image.
fn crop_region(img: &DynamicImage, rect: Rect) -> DynamicImage {
    let r = rect.clamp_to_image(img.width(), img.height());
    img.crop_imm(
        r.left() as u32,
        r.top() as u32,
        r.width() as u32,
        r.height() as u32,
    )
}

fn resample(img: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.width() == width && img.height() == height {
        img
    } else {
        img.resize_exact(width.max(1), height.max(1), FilterType::Lanczos3)
    }
}

/// Edge map: dark lines on white, like a pencil tracing.
fn contour(img: &DynamicImage) -> DynamicImage {
    let luma = DynamicImage::ImageLuma8(img.to_luma8());
    let mut edges = luma.filter3x3(&[1.0, 1.0, 1.0, 1.0, -8.0, 1.0, 1.0, 1.0, 1.0]);
    edges.invert();
    edges
}

fn fill_white(img: &mut DynamicImage, rect: Rect) {
    let r = rect.clamp_to_image(img.width(), img.height());
    let white = image::Rgba([255, 255, 255, 255]);
    for y in r.top()..r.bottom() {
        for x in r.left()..r.right() {
            img.put_pixel(x as u32, y as u32, white);
        }
    }
}

fn draw_outline(canvas: &mut RgbImage, rect: Rect) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let on_border = |x: i32, y: i32| {
        x - rect.left() < OUTLINE_WIDTH
            || rect.right() - 1 - x < OUTLINE_WIDTH
            || y - rect.top() < OUTLINE_WIDTH
            || rect.bottom() - 1 - y < OUTLINE_WIDTH
    };
    for y in rect.top().max(0)..rect.bottom().min(h) {
        for x in rect.left().max(0)..rect.right().min(w) {
            if on_border(x, y) {
                canvas.put_pixel(x as u32, y as u32, OUTLINE_COLOR);
            }
        }
    }
}

/// Save a DynamicImage, inferring the format from the extension.
fn save_image(img: &DynamicImage, path: &Path) -> Result<(), BackendError> {
    let format = ImageFormat::from_path(path).map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Unsupported output format for {}: {}",
            path.display(),
            e
        ))
    })?;

    let result = match (format, img) {
        // JPEG has no alpha channel and no 16-bit mode
        (ImageFormat::Jpeg, DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_)) => {
            img.save_with_format(path, format)
        }
        (ImageFormat::Jpeg, _) => {
            DynamicImage::ImageRgb8(img.to_rgb8()).save_with_format(path, format)
        }
        _ => img.save_with_format(path, format),
    };

    result.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn load_luma(&self, path: &Path, region: Rect) -> Result<GrayImage, BackendError> {
        let img = load_image(path)?;
        Ok(crop_region(&img, region).to_luma8())
    }

    fn crop(&self, params: &CropParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let cropped = resample(crop_region(&img, params.rect), params.width, params.height);
        save_image(&cropped, &params.output)
    }

    fn reference_sheet(&self, params: &ReferenceSheetParams) -> Result<(), BackendError> {
        let mut img = load_image(&params.source)?;
        for blank in &params.blanks {
            fill_white(&mut img, *blank);
        }
        save_image(&img, &params.output)
    }

    fn pdf(&self, params: &PdfParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let images: Vec<PlacedImage> = params
            .placements
            .iter()
            .map(|p| PlacedImage {
                pixels: resample(crop_region(&img, p.rect), p.pixel_width, p.pixel_height)
                    .to_rgb8(),
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
            })
            .collect();
        write_pdf(&params.output, params.page_width, params.page_height, &images)
    }

    fn preview(&self, params: &PreviewParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;
        let (tw, th) = params.thumbnail;
        let mut thumb = resample(crop_region(&img, params.region), tw, th);
        if params.contour {
            thumb = contour(&thumb);
        }

        let m = params.margin;
        let pad = m.saturating_mul(2);
        let mut canvas = RgbImage::from_pixel(
            tw.saturating_add(pad),
            th.saturating_add(pad),
            CANVAS_BACKGROUND,
        );
        image::imageops::overlay(&mut canvas, &thumb.to_rgb8(), i64::from(m), i64::from(m));
        for outline in &params.outlines {
            draw_outline(&mut canvas, *outline);
        }
        save_image(&DynamicImage::ImageRgb8(canvas), &params.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::Placement;
    use crate::test_helpers::{create_scan_png, create_test_image};

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = super::supported_input_extensions();
        for expected in &["jpg", "jpeg", "png", "tif", "tiff", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_image(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.identify(Path::new("/nonexistent/image.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn load_luma_returns_region_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("scan.png");
        create_scan_png(&path, 120, 90, Rect::new(10, 10, 40, 40));

        let backend = RustBackend::new();
        let luma = backend.load_luma(&path, Rect::new(5, 5, 65, 45)).unwrap();
        assert_eq!(luma.dimensions(), (60, 40));
        // (10,10) in the source is (5,5) in the region
        assert!(luma.get_pixel(5, 5).0[0] < 100);
        assert_eq!(luma.get_pixel(50, 35).0[0], 255);
    }

    #[test]
    fn crop_writes_region_at_requested_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_image(&source, 400, 300);

        let output = tmp.path().join("photo__crop__1.png");
        RustBackend::new()
            .crop(&CropParams {
                source,
                output: output.clone(),
                rect: Rect::new(50, 40, 250, 140),
                width: 100,
                height: 50,
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (100, 50));
    }

    #[test]
    fn crop_to_jpeg_from_png_source() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_image(&source, 100, 100);

        let output = tmp.path().join("photo__crop__1.jpg");
        RustBackend::new()
            .crop(&CropParams {
                source,
                output: output.clone(),
                rect: Rect::new(0, 0, 30, 20),
                width: 30,
                height: 20,
            })
            .unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (30, 20));
    }

    #[test]
    fn crop_unsupported_output_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_image(&source, 100, 100);

        let result = RustBackend::new().crop(&CropParams {
            source,
            output: tmp.path().join("photo__crop__1.xyz"),
            rect: Rect::new(0, 0, 30, 20),
            width: 30,
            height: 20,
        });
        assert!(result.is_err());
    }

    #[test]
    fn reference_sheet_whites_out_regions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("scan.png");
        create_scan_png(&source, 100, 80, Rect::new(10, 10, 50, 50));

        let output = tmp.path().join("scan__crop__0.png");
        RustBackend::new()
            .reference_sheet(&ReferenceSheetParams {
                source,
                output: output.clone(),
                blanks: vec![Rect::new(5, 5, 30, 30)],
            })
            .unwrap();

        let sheet = image::open(&output).unwrap().to_luma8();
        assert_eq!(sheet.dimensions(), (100, 80));
        assert_eq!(sheet.get_pixel(15, 15).0[0], 255);
        assert!(sheet.get_pixel(40, 40).0[0] < 100);
    }

    #[test]
    fn pdf_embeds_every_placement() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_image(&source, 300, 300);

        let output = tmp.path().join("photo.png.pdf");
        let placement = |rect: Rect| Placement {
            rect,
            pixel_width: rect.width() as u32,
            pixel_height: rect.height() as u32,
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        RustBackend::new()
            .pdf(&PdfParams {
                source,
                output: output.clone(),
                page_width: 72.0,
                page_height: 72.0,
                placements: vec![
                    placement(Rect::new(0, 0, 30, 30)),
                    placement(Rect::new(100, 100, 200, 150)),
                ],
            })
            .unwrap();

        let doc = lopdf::Document::load(&output).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn preview_canvas_is_padded_thumbnail() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_image(&source, 400, 200);

        let output = tmp.path().join("preview.png");
        RustBackend::new()
            .preview(&PreviewParams {
                source,
                output: output.clone(),
                region: Rect::new(0, 0, 400, 200),
                thumbnail: (200, 100),
                margin: 16,
                contour: true,
                outlines: vec![Rect::new(20, 20, 60, 60)],
            })
            .unwrap();

        let canvas = image::open(&output).unwrap().to_rgb8();
        assert_eq!(canvas.dimensions(), (232, 132));
        assert_eq!(*canvas.get_pixel(0, 0), CANVAS_BACKGROUND);
        assert_eq!(*canvas.get_pixel(20, 40), OUTLINE_COLOR);
    }

    #[test]
    fn outline_is_clipped_to_canvas() {
        let mut canvas = RgbImage::from_pixel(10, 10, CANVAS_BACKGROUND);
        draw_outline(&mut canvas, Rect::new(-5, -5, 50, 50));
        assert_eq!(*canvas.get_pixel(5, 5), CANVAS_BACKGROUND);
    }
}
