//! Output file names derived from the source path.
//!
//! Every artifact lands next to the source image:
//! - `photo.jpg` crop 2 → `photo__crop__2.jpg`
//! - with `format = "png"` → `photo__crop__2.png`
//! - reference sheet → `photo__crop__0.jpg`
//! - PDF → `photo.jpg.pdf`

use std::path::{Path, PathBuf};

/// Separator between the source stem and the crop index.
pub const CROP_MARKER: &str = "__crop__";

/// Extension for crop files: the configured format, or the source's own
/// extension when none is configured. Includes the leading dot; empty if
/// the source has no extension.
pub fn crop_extension(source: &Path, format: Option<&str>) -> String {
    match format {
        Some(f) => format!(".{}", f.trim_start_matches('.')),
        None => source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default(),
    }
}

/// Path of crop number `index` (0 = reference sheet, 1.. = regions).
pub fn crop_filename(source: &Path, index: usize, format: Option<&str>) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!(
        "{stem}{CROP_MARKER}{index}{}",
        crop_extension(source, format)
    );
    source.with_file_name(name)
}

/// Path of the PDF: the full source file name with `.pdf` appended.
pub fn pdf_filename(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".pdf");
    PathBuf::from(name)
}
