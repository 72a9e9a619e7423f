//! Automatic content detection.
//!
//! Finds the tight bounding box of everything that is not background in a
//! greyscale view of the current region. This is the only place pixel
//! values reach the core; everything downstream works on rectangles.
//!
//! ```text
//! luma ──(optional binarize)──▶ median 3×3 ──▶ |px − background| > threshold ──▶ bbox
//! ```
//!
//! A scan on a white flatbed, for example, yields the box around the photo
//! lying on it. An all-background view yields `None`.

use crate::rect::Rect;
use image::GrayImage;

/// Tuning for the background-difference test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Uniform background level (255 = white paper).
    pub background: u8,
    /// Pixels differing from the background by more than this are content.
    pub threshold: u8,
    /// Run a 3×3 median filter first to drop dust and sensor noise.
    pub denoise: bool,
    /// Snap every pixel to pure black or white before filtering.
    pub binarize: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            background: 255,
            threshold: 0,
            denoise: true,
            binarize: false,
        }
    }
}

/// A bi-level foreground/background grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask from row-major bits. Returns `None` if the length does
    /// not match the dimensions.
    pub fn new(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        (bits.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            bits,
        })
    }

    /// Classify every pixel of a greyscale image.
    pub fn from_luma(img: &GrayImage, options: &DetectOptions) -> Self {
        let mut work = img.clone();
        if options.binarize {
            binarize(&mut work);
        }
        if options.denoise {
            work = median3x3(&work);
        }
        let bits = work
            .pixels()
            .map(|p| p.0[0].abs_diff(options.background) > options.threshold)
            .collect();
        Self {
            width: work.width(),
            height: work.height(),
            bits,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Smallest rectangle containing every foreground pixel (exclusive
    /// right/bottom edges), or `None` if there is none.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            let row = &self.bits[(y * self.width) as usize..((y + 1) * self.width) as usize];
            let Some(first) = row.iter().position(|&b| b) else {
                continue;
            };
            let last = row.iter().rposition(|&b| b).unwrap_or(first);
            let (x0, y0, x1, _) = bounds.unwrap_or((first as u32, y, last as u32, y));
            bounds = Some((x0.min(first as u32), y0, x1.max(last as u32), y));
        }
        bounds.map(|(x0, y0, x1, y1)| {
            Rect::new(x0 as i32, y0 as i32, x1 as i32 + 1, y1 as i32 + 1)
        })
    }
}

/// Bounding box of non-background content in view-local coordinates.
pub fn detect(img: &GrayImage, options: &DetectOptions) -> Option<Rect> {
    Mask::from_luma(img, options).bounding_box()
}

fn binarize(img: &mut GrayImage) {
    for p in img.pixels_mut() {
        p.0[0] = if p.0[0] >= 128 { 255 } else { 0 };
    }
}

/// 3×3 median with edge pixels replicated.
fn median3x3(img: &GrayImage) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img.clone();
    }
    GrayImage::from_fn(w, h, |x, y| {
        let mut window = [0u8; 9];
        let mut i = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                let sx = (i64::from(x) + dx).clamp(0, i64::from(w) - 1) as u32;
                let sy = (i64::from(y) + dy).clamp(0, i64::from(h) - 1) as u32;
                window[i] = img.get_pixel(sx, sy).0[0];
                i += 1;
            }
        }
        window.sort_unstable();
        image::Luma([window[4]])
    })
}
