//! Region accumulation over a single source image.
//!
//! A [`RegionSession`] owns the ordered list of output rectangles (in
//! full-image coordinates) and the current [`ViewState`]. Screen-space
//! gestures reported by the presentation layer run through one pipeline:
//!
//! ```text
//! normalize → clip to thumbnail → reject if too small
//!           → scale to view-local → translate by origin → clamp to image
//! ```
//!
//! The result is either appended as a new output rectangle or, when zoom is
//! armed, becomes the new visible region. One gesture never does both.
//!
//! Two independent modes drive the behavior:
//!
//! | Mode | Values | Effect |
//! |---|---|---|
//! | [`DragMode`] | `Select`, `Zoom` | what the next committed drag does |
//! | [`ViewMode`] | `Full`, `Zoomed` | whether an unzoom is meaningful |
//!
//! The session is single-threaded: it expects one caller driving it from
//! one control loop. Share it across threads only behind external locking.

use crate::rect::{Point, Rect, Rounding, to_i32};
use crate::view::ViewState;
use serde::Serialize;

/// Tunables that differ between front-ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Drags whose shorter side (in screen pixels, after clipping) is below
    /// this are discarded.
    pub min_drag_size: u32,
    /// Padding between the canvas edge and the thumbnail, in screen pixels.
    pub canvas_margin: u32,
    /// Box the view thumbnail is fitted into.
    pub thumbnail_box: (u32, u32),
    pub rounding: Rounding,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_drag_size: 10,
            canvas_margin: 16,
            thumbnail_box: (896, 608),
            rounding: Rounding::HalfUp,
        }
    }
}

/// What the next committed drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// Append an output rectangle.
    #[default]
    Select,
    /// Replace the visible region (zoom armed).
    Zoom,
}

/// Whether the view shows the whole image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Full,
    Zoomed,
}

/// Result of committing a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// A new output rectangle was appended at 1-based `index`.
    Added { index: usize, rect: Rect },
    /// The view now shows `region`.
    Zoomed { region: Rect },
    /// Too small, or entirely outside the thumbnail. Nothing changed.
    Rejected,
    /// Release without a preceding press.
    NoGesture,
}

/// Live feedback while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview {
    /// Provisional rectangle in screen coordinates (unclipped).
    pub screen: Rect,
    /// Provisional size in source pixels, rounded to one decimal.
    pub source_size: (f64, f64),
}

/// An output rectangle with its 1-based export number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberedRect {
    pub index: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct RegionSession {
    image: (u32, u32),
    settings: SessionSettings,
    view: ViewState,
    rects: Vec<Rect>,
    drag_mode: DragMode,
    view_mode: ViewMode,
    drag_start: Option<Point>,
}

impl RegionSession {
    /// Start a session for an image of `image` = (width, height) pixels.
    pub fn new(image: (u32, u32), settings: SessionSettings) -> Self {
        let image = (image.0.max(1), image.1.max(1));
        Self {
            image,
            settings,
            view: ViewState::identity(image, settings.thumbnail_box),
            rects: Vec::new(),
            drag_mode: DragMode::Select,
            view_mode: ViewMode::Full,
            drag_start: None,
        }
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Output rectangles in creation order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    // =========================================================================
    // Drag gesture
    // =========================================================================

    pub fn begin_drag(&mut self, at: Point) {
        self.drag_start = Some(at);
    }

    /// Provisional rectangle for live feedback. Does not change the session.
    pub fn update_drag(&self, at: Point) -> Option<DragPreview> {
        let start = self.drag_start?;
        let screen = Rect::from_points(start, at);
        let scale = self.view.scale();
        let tenths = |a: i32, b: i32, s: f64| {
            (f64::from(a.abs_diff(b)) * s * 10.0 + 0.5).floor() / 10.0
        };
        Some(DragPreview {
            screen,
            source_size: (
                tenths(start.x, at.x, scale.x),
                tenths(start.y, at.y, scale.y),
            ),
        })
    }

    /// Finish the drag started by [`begin_drag`](Self::begin_drag).
    pub fn commit_drag(&mut self, at: Point) -> DragOutcome {
        match self.drag_start.take() {
            Some(start) => self.commit_screen_rect(Rect::from_points(start, at)),
            None => DragOutcome::NoGesture,
        }
    }

    /// Run a whole screen-space rectangle through the drag pipeline.
    pub fn commit_screen_rect(&mut self, screen: Rect) -> DragOutcome {
        let Some(source) = self.screen_to_source(screen) else {
            log::debug!("drag {screen} rejected (min size {})", self.settings.min_drag_size);
            return DragOutcome::Rejected;
        };

        match self.drag_mode {
            DragMode::Zoom => {
                self.view = ViewState::new(source, self.settings.thumbnail_box);
                self.drag_mode = DragMode::Select;
                self.view_mode = ViewMode::Zoomed;
                log::debug!("zoomed to {source}");
                DragOutcome::Zoomed { region: source }
            }
            DragMode::Select => {
                self.rects.push(source);
                log::debug!("added #{} {source}", self.rects.len());
                DragOutcome::Added {
                    index: self.rects.len(),
                    rect: source,
                }
            }
        }
    }

    /// Map a screen rectangle to a clamped full-image rectangle.
    ///
    /// Returns `None` when the clipped drag is smaller than the minimum drag
    /// size or misses the thumbnail entirely.
    pub fn screen_to_source(&self, screen: Rect) -> Option<Rect> {
        let margin = to_i32(self.settings.canvas_margin);
        let clipped = screen.clip_to(self.view.thumbnail_rect(), margin)?;
        if clipped.min_side() < to_i32(self.settings.min_drag_size) {
            return None;
        }
        let origin = self.view.origin();
        Some(
            clipped
                .scale_to_source(self.view.scale(), margin, self.settings.rounding)
                .translate(origin.x, origin.y)
                .clamp_to_image(self.image.0, self.image.1),
        )
    }

    /// Output rectangles projected onto the current canvas, for redrawing.
    pub fn screen_rects(&self) -> Vec<Rect> {
        let scale = self.view.scale();
        let origin = self.view.origin();
        let margin = to_i32(self.settings.canvas_margin);
        self.rects
            .iter()
            .map(|r| r.project_to_screen(scale, origin, margin, self.settings.rounding))
            .collect()
    }

    // =========================================================================
    // Sequence edits
    // =========================================================================

    /// Fold the last rectangle into the one before it.
    ///
    /// Returns the merged rectangle, or `None` (and changes nothing) with
    /// fewer than two rectangles. Also disarms zoom.
    pub fn merge_last_two(&mut self) -> Option<Rect> {
        if self.rects.len() < 2 {
            return None;
        }
        let last = self.rects.pop()?;
        let target = self.rects.last_mut()?;
        *target = target.union(&last);
        self.drag_mode = DragMode::Select;
        Some(*target)
    }

    /// Remove and return the most recent rectangle.
    pub fn undo(&mut self) -> Option<Rect> {
        self.rects.pop()
    }

    /// Append a rectangle found by auto-detection.
    ///
    /// `local` is relative to the current view; it is offset by the view
    /// origin and clamped exactly like a manual drag.
    pub fn add_detection(&mut self, local: Rect) -> NumberedRect {
        let origin = self.view.origin();
        let rect = local
            .translate(origin.x, origin.y)
            .clamp_to_image(self.image.0, self.image.1);
        self.rects.push(rect);
        NumberedRect {
            index: self.rects.len(),
            rect,
        }
    }

    // =========================================================================
    // Modes and view
    // =========================================================================

    pub fn arm_zoom(&mut self) {
        self.drag_mode = DragMode::Zoom;
    }

    pub fn disarm_zoom(&mut self) {
        self.drag_mode = DragMode::Select;
    }

    /// Show the whole image again. Output rectangles are kept.
    pub fn reset_view(&mut self) {
        self.view = ViewState::identity(self.image, self.settings.thumbnail_box);
        self.view_mode = ViewMode::Full;
        self.drag_mode = DragMode::Select;
    }

    /// Drop every rectangle and return to the initial state.
    pub fn reset_all(&mut self) {
        self.rects.clear();
        self.drag_start = None;
        self.reset_view();
    }

    // =========================================================================
    // Affordances and export
    // =========================================================================

    pub fn can_merge(&self) -> bool {
        self.rects.len() > 1
    }

    pub fn can_undo(&self) -> bool {
        !self.rects.is_empty()
    }

    pub fn can_export(&self) -> bool {
        !self.rects.is_empty()
    }

    pub fn can_unzoom(&self) -> bool {
        self.view_mode == ViewMode::Zoomed
    }

    /// Rectangles in creation order, numbered from 1.
    pub fn exported(&self) -> Vec<NumberedRect> {
        self.rects
            .iter()
            .enumerate()
            .map(|(i, &rect)| NumberedRect { index: i + 1, rect })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(w: u32, h: u32) -> RegionSession {
        RegionSession::new((w, h), SessionSettings::default())
    }

    /// Drag from canvas point (x1, y1) to (x2, y2).
    fn drag(s: &mut RegionSession, x1: i32, y1: i32, x2: i32, y2: i32) -> DragOutcome {
        s.begin_drag(Point::new(x1, y1));
        s.commit_drag(Point::new(x2, y2))
    }

    #[test]
    fn new_session_shows_whole_image() {
        let s = session(800, 600);
        assert_eq!(s.view().region(), Rect::new(0, 0, 800, 600));
        assert_eq!(s.drag_mode(), DragMode::Select);
        assert_eq!(s.view_mode(), ViewMode::Full);
        assert!(s.is_empty());
    }

    #[test]
    fn drag_adds_source_rect() {
        let mut s = session(800, 600);
        let outcome = drag(&mut s, 116, 116, 316, 316);
        assert_eq!(
            outcome,
            DragOutcome::Added {
                index: 1,
                rect: Rect::new(100, 100, 300, 300)
            }
        );
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn drag_direction_does_not_matter() {
        let mut s = session(800, 600);
        drag(&mut s, 316, 316, 116, 116);
        assert_eq!(s.rects(), &[Rect::new(100, 100, 300, 300)]);
    }

    #[test]
    fn drag_on_scaled_thumbnail_maps_to_full_resolution() {
        // 1792x1216 shows at 896x608 → scale 2
        let mut s = session(1792, 1216);
        drag(&mut s, 16, 16, 66, 116);
        assert_eq!(s.rects(), &[Rect::new(0, 0, 100, 200)]);
    }

    #[test]
    fn small_drag_is_rejected() {
        let mut s = session(800, 600);
        assert_eq!(drag(&mut s, 100, 100, 105, 105), DragOutcome::Rejected);
        assert!(s.is_empty());
    }

    #[test]
    fn min_drag_size_is_configurable() {
        let settings = SessionSettings {
            min_drag_size: 3,
            ..SessionSettings::default()
        };
        let mut s = RegionSession::new((800, 600), settings);
        assert!(matches!(drag(&mut s, 100, 100, 105, 105), DragOutcome::Added { .. }));
    }

    #[test]
    fn drag_partly_off_thumbnail_is_clipped() {
        let mut s = session(800, 600);
        drag(&mut s, 0, 0, 200, 200);
        assert_eq!(s.rects(), &[Rect::new(0, 0, 184, 184)]);
    }

    #[test]
    fn drag_clipped_below_minimum_is_rejected() {
        let mut s = session(800, 600);
        // Only 4 pixels of this drag overlap the thumbnail's right edge
        assert_eq!(drag(&mut s, 812, 100, 900, 300), DragOutcome::Rejected);
    }

    #[test]
    fn drag_outside_thumbnail_is_rejected() {
        let mut s = session(800, 600);
        assert_eq!(drag(&mut s, 850, 700, 900, 760), DragOutcome::Rejected);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = session(800, 600);
        assert_eq!(s.commit_drag(Point::new(10, 10)), DragOutcome::NoGesture);
    }

    #[test]
    fn update_drag_reports_source_size() {
        let mut s = session(1792, 1216);
        assert!(s.update_drag(Point::new(5, 5)).is_none());
        s.begin_drag(Point::new(16, 16));
        let preview = s.update_drag(Point::new(66, 41)).unwrap();
        assert_eq!(preview.screen, Rect::new(16, 16, 66, 41));
        assert_eq!(preview.source_size, (100.0, 50.0));
        assert!(s.is_empty());
    }

    #[test]
    fn update_drag_across_whole_coordinate_range() {
        let mut s = session(800, 600);
        s.begin_drag(Point::new(i32::MIN, 0));
        let preview = s.update_drag(Point::new(i32::MAX, 10)).unwrap();
        assert_eq!(preview.screen, Rect::new(i32::MIN, 0, i32::MAX, 10));
        assert_eq!(preview.source_size, (f64::from(u32::MAX), 10.0));
    }

    #[test]
    fn min_drag_size_beyond_i32_rejects_everything() {
        let settings = SessionSettings {
            min_drag_size: 3_000_000_000,
            ..SessionSettings::default()
        };
        let mut s = RegionSession::new((800, 600), settings);
        assert_eq!(
            s.commit_screen_rect(Rect::new(100, 100, 100, 100)),
            DragOutcome::Rejected
        );
        assert_eq!(drag(&mut s, 16, 16, 400, 400), DragOutcome::Rejected);
        assert!(s.is_empty());
    }

    // =========================================================================
    // Zoom
    // =========================================================================

    #[test]
    fn zoom_replaces_view_and_not_rects() {
        let mut s = session(800, 600);
        s.arm_zoom();
        let outcome = drag(&mut s, 116, 116, 316, 316);
        assert_eq!(
            outcome,
            DragOutcome::Zoomed {
                region: Rect::new(100, 100, 300, 300)
            }
        );
        assert!(s.is_empty());
        assert_eq!(s.view().origin(), Point::new(100, 100));
        assert_eq!(s.view().visible_size(), (200, 200));
        assert_eq!(s.drag_mode(), DragMode::Select);
        assert!(s.can_unzoom());

        s.reset_view();
        assert_eq!(s.view().origin(), Point::new(0, 0));
        assert_eq!(s.view().visible_size(), (800, 600));
        assert!(!s.can_unzoom());
    }

    #[test]
    fn drag_in_zoomed_view_is_offset_by_origin() {
        let mut s = session(800, 600);
        s.arm_zoom();
        drag(&mut s, 116, 116, 316, 316);
        // Zoomed 200x200 region shows at 200x200, scale 1, origin (100,100)
        drag(&mut s, 26, 36, 66, 76);
        assert_eq!(s.rects(), &[Rect::new(110, 120, 150, 160)]);
    }

    #[test]
    fn disarm_zoom_restores_select() {
        let mut s = session(800, 600);
        s.arm_zoom();
        s.disarm_zoom();
        assert!(matches!(drag(&mut s, 116, 116, 316, 316), DragOutcome::Added { .. }));
    }

    #[test]
    fn rejected_drag_keeps_zoom_armed() {
        let mut s = session(800, 600);
        s.arm_zoom();
        drag(&mut s, 100, 100, 102, 102);
        assert_eq!(s.drag_mode(), DragMode::Zoom);
    }

    #[test]
    fn screen_rects_follow_the_view() {
        let mut s = session(1792, 1216);
        drag(&mut s, 16, 16, 66, 116);
        assert_eq!(s.screen_rects(), vec![Rect::new(16, 16, 66, 116)]);

        s.arm_zoom();
        // Zoom to source (0,0)-(896,608): shown 1:1
        drag(&mut s, 16, 16, 464, 320);
        assert_eq!(s.view().scale().x, 1.0);
        assert_eq!(s.screen_rects(), vec![Rect::new(16, 16, 116, 216)]);
    }

    // =========================================================================
    // Merge, undo, reset
    // =========================================================================

    #[test]
    fn merge_unions_last_two() {
        let mut s = session(800, 600);
        drag(&mut s, 16, 16, 26, 26);
        drag(&mut s, 21, 21, 36, 36);
        assert_eq!(s.merge_last_two(), Some(Rect::new(0, 0, 20, 20)));
        assert_eq!(s.rects(), &[Rect::new(0, 0, 20, 20)]);
    }

    #[test]
    fn merge_only_touches_the_last_pair() {
        let mut s = session(800, 600);
        drag(&mut s, 416, 416, 516, 516);
        drag(&mut s, 16, 16, 26, 26);
        drag(&mut s, 21, 21, 36, 36);
        s.merge_last_two();
        assert_eq!(
            s.rects(),
            &[Rect::new(400, 400, 500, 500), Rect::new(0, 0, 20, 20)]
        );
    }

    #[test]
    fn merge_needs_two_rects() {
        let mut s = session(800, 600);
        assert_eq!(s.merge_last_two(), None);
        drag(&mut s, 16, 16, 66, 66);
        assert!(!s.can_merge());
        assert_eq!(s.merge_last_two(), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn merge_disarms_zoom() {
        let mut s = session(800, 600);
        drag(&mut s, 16, 16, 66, 66);
        drag(&mut s, 116, 116, 166, 166);
        s.arm_zoom();
        s.merge_last_two();
        assert_eq!(s.drag_mode(), DragMode::Select);
    }

    #[test]
    fn undo_pops_once_per_add_then_noops() {
        let mut s = session(800, 600);
        for i in 0..4 {
            drag(&mut s, 16 + i * 20, 16, 30 + i * 20, 60);
        }
        for expected in (0..4).rev() {
            assert!(s.undo().is_some());
            assert_eq!(s.len(), expected);
        }
        assert_eq!(s.undo(), None);
        assert!(s.is_empty());
        assert!(!s.can_undo());
    }

    #[test]
    fn reset_view_keeps_rects() {
        let mut s = session(800, 600);
        drag(&mut s, 16, 16, 66, 66);
        s.arm_zoom();
        drag(&mut s, 116, 116, 316, 316);
        s.reset_view();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn reset_all_clears_everything() {
        let mut s = session(800, 600);
        drag(&mut s, 16, 16, 66, 66);
        s.arm_zoom();
        drag(&mut s, 116, 116, 316, 316);
        s.arm_zoom();
        s.reset_all();
        assert!(s.is_empty());
        assert_eq!(s.drag_mode(), DragMode::Select);
        assert_eq!(s.view_mode(), ViewMode::Full);
        assert_eq!(s.view().region(), Rect::new(0, 0, 800, 600));
    }

    // =========================================================================
    // Detection and export
    // =========================================================================

    #[test]
    fn detection_is_offset_and_clamped() {
        let mut s = session(800, 600);
        s.arm_zoom();
        drag(&mut s, 116, 116, 316, 316);
        let added = s.add_detection(Rect::new(10, 20, 900, 40));
        assert_eq!(added.index, 1);
        assert_eq!(added.rect, Rect::new(110, 120, 800, 140));
    }

    #[test]
    fn exported_is_one_based_in_creation_order() {
        let mut s = session(800, 600);
        drag(&mut s, 16, 16, 66, 66);
        drag(&mut s, 116, 116, 166, 166);
        let exported = s.exported();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].index, 1);
        assert_eq!(exported[0].rect, Rect::new(0, 0, 50, 50));
        assert_eq!(exported[1].index, 2);
        assert_eq!(exported[1].rect, Rect::new(100, 100, 150, 150));
        // Exporting does not consume anything
        assert_eq!(s.len(), 2);
    }
}
