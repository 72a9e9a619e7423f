//! # Cropper
//!
//! Mark several rectangular regions on one source image and export each as
//! its own file, optionally with a one-page PDF and a reference sheet.
//!
//! # Architecture: Geometry Core + Collaborators
//!
//! The hard part is keeping rectangles consistent while the view changes
//! underneath them: thumbnail scaling, zooming into a sub-region, clipping
//! to the canvas, merging and clamping back into the image. That core is
//! pure and has no I/O:
//!
//! ```text
//! rect      Rect + coordinate transforms (screen ⇄ source)
//! view      visible region + thumbnail size → scale
//! session   ordered regions, drag pipeline, zoom, merge, undo, reset
//! detect    foreground bounding box of a greyscale view
//! ```
//!
//! Everything that touches pixels or files sits behind the
//! [`imaging::ImageBackend`] trait, so the session and export logic is
//! tested against a mock backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`rect`] | Normalized integer rectangles, scaling, clipping, clamping |
//! | [`view`] | The mapping between thumbnail and source for the current view |
//! | [`session`] | The region list and its gestures: add, zoom, plus, undo, reset |
//! | [`detect`] | Automatic content box from a greyscale image |
//! | [`config`] | `cropper.toml` loading, layering and sanitizing |
//! | [`naming`] | `<stem>__crop__<n><ext>` and `<source>.pdf` file names |
//! | [`export`] | Writes crops, the PDF and the reference sheet |
//! | [`script`] | The line-based gesture command language |
//! | [`workbench`] | Binds a session, a backend and config; runs commands |
//! | [`imaging`] | Pure-Rust image operations: crop, downsample, preview, PDF |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Scale Is Derived, Never Cached
//!
//! A view stores only its visible region and thumbnail size. Scale factors
//! are recomputed from those on every use, so zooming in and out any number
//! of times cannot accumulate drift.
//!
//! ## One Rounding Policy
//!
//! Both directions of the screen ⇄ source mapping use the same configured
//! [`rect::Rounding`] (half-up by default).
//!
//! ## Clamping Never Produces Empty Regions
//!
//! [`rect::Rect::clamp_to_image`] pins the left/top edges to `[0, W-1]` and
//! the right/bottom edges to `[1, W]`, so every stored region has at least
//! one pixel, even if it was dragged entirely off the image.

pub mod config;
pub mod detect;
pub mod export;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod rect;
pub mod script;
pub mod session;
pub mod view;
pub mod workbench;

#[cfg(test)]
pub(crate) mod test_helpers;
