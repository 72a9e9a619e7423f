//! CLI output formatting for sessions and exports.
//!
//! # Information-First Display
//!
//! Every region is shown by its export number and its rectangle in source
//! pixels; file paths only appear once something is written.
//!
//! # Output Format
//!
//! ## Session
//!
//! ```text
//! + 001 (0,0)-(200,100) 200x100
//! zoom: next drag sets the view
//! view (100,100)-(300,300)
//! merged into 001 (0,0)-(400,300) 400x300
//! ```
//!
//! ## Export
//!
//! ```text
//! 001 (0,0)-(200,100) 200x100
//!     → photo__crop__1.jpg
//! 002 (400,50)-(600,250) 200x200
//!     → photo__crop__2.jpg (100x100)
//! PDF → photo.jpg.pdf
//! Reference sheet → photo__crop__0.jpg
//!
//! Wrote 4 files
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::export::ExportReport;
use crate::rect::Rect;
use crate::session::{DragMode, DragOutcome, NumberedRect, RegionSession};
use crate::workbench::Event;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Index, rectangle and size of one region.
///
/// ```text
/// 001 (0,0)-(200,100) 200x100
/// ```
fn region_line(index: usize, rect: Rect) -> String {
    format!(
        "{} {} {}x{}",
        format_index(index),
        rect,
        rect.width(),
        rect.height()
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Session
// ============================================================================

/// Format what a single command did.
pub fn format_event(event: &Event) -> Vec<String> {
    match event {
        Event::DragStarted(_) => Vec::new(),
        Event::DragPreview(preview) => vec![format!(
            "{:.1} x {:.1}",
            preview.source_size.0, preview.source_size.1
        )],
        Event::Drag(DragOutcome::Added { index, rect }) => {
            vec![format!("+ {}", region_line(*index, *rect))]
        }
        Event::Drag(DragOutcome::Zoomed { region }) => vec![format!("view {}", region)],
        Event::Drag(DragOutcome::Rejected) => vec!["drag too small, ignored".to_string()],
        Event::Drag(DragOutcome::NoGesture) => vec!["release without press".to_string()],
        Event::ZoomArmed => vec!["zoom: next drag sets the view".to_string()],
        Event::ZoomCancelled => vec!["zoom cancelled".to_string()],
        Event::Unzoomed => vec!["view: whole image".to_string()],
        Event::Merged { index, rect } => {
            vec![format!("merged into {}", region_line(*index, *rect))]
        }
        Event::Undone { rect, remaining } => {
            vec![format!("- {} ({} left)", rect, remaining)]
        }
        Event::Detected(n) => vec![format!("+ {} (auto)", region_line(n.index, n.rect))],
        Event::NothingDetected => vec!["auto: nothing found".to_string()],
        Event::BlackWhite(on) => vec![format!("black/white: {}", on_off(*on))],
        Event::Contour(on) => vec![format!("contour: {}", on_off(*on))],
        Event::Reset => vec!["reset".to_string()],
        Event::PreviewWritten(path) => vec![format!("preview → {}", path.display())],
        Event::Listing(rects) => format_regions(rects),
        Event::Exported(report) => format_export_report(report),
        Event::Quit => vec!["quit, nothing written".to_string()],
        Event::Unavailable(reason) => vec![format!("unavailable: {}", reason)],
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

/// Format the region list.
///
/// ```text
/// 001 (0,0)-(200,100) 200x100
/// 002 (400,50)-(600,250) 200x200
/// ```
pub fn format_regions(rects: &[NumberedRect]) -> Vec<String> {
    if rects.is_empty() {
        return vec!["no regions".to_string()];
    }
    rects.iter().map(|n| region_line(n.index, n.rect)).collect()
}

/// One-line summary of the session state, used as the prompt.
///
/// ```text
/// [2 regions | zoomed | zoom armed]
/// ```
pub fn format_status(session: &RegionSession) -> String {
    let mut parts = vec![match session.len() {
        1 => "1 region".to_string(),
        n => format!("{} regions", n),
    }];
    if session.can_unzoom() {
        parts.push("zoomed".to_string());
    }
    if session.drag_mode() == DragMode::Zoom {
        parts.push("zoom armed".to_string());
    }
    format!("[{}]", parts.join(" | "))
}

pub fn print_event(event: &Event) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Export
// ============================================================================

/// Format the export inventory.
pub fn format_export_report(report: &ExportReport) -> Vec<String> {
    let mut lines = Vec::new();
    for crop in &report.crops {
        lines.push(region_line(crop.index, crop.rect));
        let resized = (crop.width as i32, crop.height as i32)
            != (crop.rect.width(), crop.rect.height());
        if resized {
            lines.push(format!(
                "{}→ {} ({}x{})",
                indent(1),
                file_name(&crop.path),
                crop.width,
                crop.height
            ));
        } else {
            lines.push(format!("{}→ {}", indent(1), file_name(&crop.path)));
        }
    }
    if let Some(pdf) = &report.pdf {
        lines.push(format!("PDF → {}", file_name(pdf)));
    }
    if let Some(sheet) = &report.reference_sheet {
        lines.push(format!("Reference sheet → {}", file_name(sheet)));
    }
    lines.push(String::new());
    lines.push(match report.file_count() {
        1 => "Wrote 1 file".to_string(),
        n => format!("Wrote {} files", n),
    });
    lines
}
