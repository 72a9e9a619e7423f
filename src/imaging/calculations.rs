//! Pure calculation functions for image dimensions and page units.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size of a thumbnail that fits inside a bounding box.
///
/// Preserves the aspect ratio and never enlarges: a source that already
/// fits on both axes is returned unchanged. The constrained axis takes the
/// box size; the other axis picks whichever of floor/ceil keeps the aspect
/// ratio closest to the source's, and is at least 1 pixel.
///
/// # Arguments
/// * `source` - Source dimensions (width, height)
/// * `bounds` - Bounding box (width, height)
///
/// # Examples
/// ```
/// # use cropper::imaging::calculate_thumbnail_dimensions;
/// // 1792x1216 into the 896x608 canvas → exactly half
/// assert_eq!(calculate_thumbnail_dimensions((1792, 1216), (896, 608)), (896, 608));
///
/// // Already fits → unchanged
/// assert_eq!(calculate_thumbnail_dimensions((800, 600), (896, 608)), (800, 600));
/// ```
pub fn calculate_thumbnail_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (source.0.max(1), source.1.max(1));
    let (box_w, box_h) = (bounds.0.max(1), bounds.1.max(1));

    if box_w >= src_w && box_h >= src_h {
        return (src_w, src_h);
    }

    let aspect = src_w as f64 / src_h as f64;
    let (bw, bh) = (box_w as f64, box_h as f64);

    if bw / bh >= aspect {
        // Box is relatively wider: height is the constraint
        let w = closest_aspect(bh * aspect, |n| (aspect - n / bh).abs());
        (w, box_h)
    } else {
        // Box is relatively taller: width is the constraint
        let h = closest_aspect(bw / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bw / n).abs()
            }
        });
        (box_w, h)
    }
}

/// Pick floor or ceil of `value`, whichever scores lower (floor on ties),
/// never below 1.
fn closest_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let floor = value.floor();
    let ceil = value.ceil();
    let best = if score(ceil) < score(floor) { ceil } else { floor };
    (best as u32).max(1)
}

/// Calculate the output size of a crop downsampled by an integer divisor.
///
/// Each axis becomes `(n + divisor / 2) / divisor` (integer division, so
/// halves round up), then the crop is fitted into that box with
/// [`calculate_thumbnail_dimensions`] to keep its aspect ratio.
/// A divisor of 0 is treated as 1.
///
/// The fit can land away from the plain per-axis quotient. When the short
/// side bottoms out at 1 pixel, the long side shrinks to match the aspect
/// ratio: a 5x400 crop with divisor 4 becomes 1x80, not 1x100.
pub fn calculate_downsample_dimensions(size: (u32, u32), divisor: u32) -> (u32, u32) {
    let d = divisor.max(1);
    if d == 1 {
        return size;
    }
    let half = d / 2;
    let target = (
        (size.0.saturating_add(half) / d).max(1),
        (size.1.saturating_add(half) / d).max(1),
    );
    calculate_thumbnail_dimensions(size, target)
}

/// Convert a pixel distance to PDF points at the given resolution,
/// rounded to three decimals.
pub fn pixels_to_points(pixels: i64, dpi: u32) -> f64 {
    let points = pixels as f64 * 72.0 / f64::from(dpi.max(1));
    (points * 1000.0).round() / 1000.0
}
