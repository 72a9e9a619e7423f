//! Shared test utilities: synthetic images on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let path = tmp.path().join("scan.png");
//! create_scan_png(&path, 400, 300, Rect::new(50, 40, 250, 200));
//! ```

use crate::rect::Rect;
use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::Path;

/// Write an RGB gradient of `width × height`, format from the extension.
pub fn create_test_image(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    img.save(path).unwrap();
}

/// Write a greyscale PNG: white paper with one dark `block` on it, like a
/// photo lying on a flatbed scanner.
pub fn create_scan_png(path: &Path, width: u32, height: u32, block: Rect) {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i32, y as i32);
        if (block.left()..block.right()).contains(&x) && (block.top()..block.bottom()).contains(&y)
        {
            Luma([30])
        } else {
            Luma([255])
        }
    });
    img.save(path).unwrap();
}
