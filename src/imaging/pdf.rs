//! Single-page PDF assembly with `lopdf`.
//!
//! The page is the size of the full source image at the configured DPI.
//! Each region is embedded as an uncompressed RGB image XObject (the whole
//! document is Flate-compressed on save) and drawn with a `cm` transform at
//! its original position, so the page reads like the source with only the
//! selected regions visible.

use super::backend::BackendError;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::io::Write;
use std::path::Path;

/// An image placed on the page, position and size in points.
pub struct PlacedImage {
    pub pixels: RgbImage,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

fn pdf_error(e: impl std::fmt::Display) -> BackendError {
    BackendError::ProcessingFailed(format!("PDF write failed: {e}"))
}

/// Build the document in memory.
pub fn build_document(
    page_width: f64,
    page_height: f64,
    images: &[PlacedImage],
) -> Result<Document, BackendError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut xobjects = Dictionary::new();
    let mut operations = Vec::with_capacity(images.len() * 4);

    for (i, placed) in images.iter().enumerate() {
        let name = format!("Im{}", i + 1);
        let (w, h) = placed.pixels.dimensions();
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(w),
                "Height" => i64::from(h),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            placed.pixels.as_raw().clone(),
        );
        let image_id = doc.add_object(image);
        xobjects.set(name.clone(), image_id);

        operations.push(Operation::new("q", vec![]));
        operations.push(Operation::new(
            "cm",
            vec![
                real(placed.width),
                0.into(),
                0.into(),
                real(placed.height),
                real(placed.x),
                real(placed.y),
            ],
        ));
        operations.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        operations.push(Operation::new("Q", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        Dictionary::new(),
        content.encode().map_err(pdf_error)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => xobjects,
        },
        "MediaBox" => vec![0.into(), 0.into(), real(page_width), real(page_height)],
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    Ok(doc)
}

/// Build and save the document to `path`.
pub fn write_pdf(
    path: &Path,
    page_width: f64,
    page_height: f64,
    images: &[PlacedImage],
) -> Result<(), BackendError> {
    let mut doc = build_document(page_width, page_height, images)?;
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    doc.save_to(&mut writer).map_err(pdf_error)?;
    writer.flush()?;
    Ok(())
}
