//! Presentation adapter: one source image, one session, one backend.
//!
//! The [`Workbench`] is what a front-end drives. It turns [`Command`]s into
//! calls on the [`RegionSession`], the auto-detector and the export
//! pipeline, and reports what happened as an [`Event`]. It also owns the
//! presentation-only toggles (contour preview, black/white detection
//! pre-pass), which never change stored coordinates.
//!
//! Commands whose affordance is unavailable (`plus` with fewer than two
//! regions, `undo`/`crops` with none, `unzoom` without a zoom) change
//! nothing and return [`Event::Unavailable`].

use crate::config::CropperConfig;
use crate::detect::{DetectOptions, detect};
use crate::export::{ExportError, ExportReport, ExportSettings, export};
use crate::imaging::{BackendError, ImageBackend, create_preview, get_dimensions, plan_preview};
use crate::rect::{Point, Rect};
use crate::script::Command;
use crate::session::{DragOutcome, DragPreview, NumberedRect, RegionSession};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("Image processing failed: {0}")]
    Backend(#[from] BackendError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DragStarted(Point),
    DragPreview(DragPreview),
    Drag(DragOutcome),
    ZoomArmed,
    ZoomCancelled,
    Unzoomed,
    /// The last two regions became region `index`.
    Merged { index: usize, rect: Rect },
    /// The last region was dropped.
    Undone { rect: Rect, remaining: usize },
    Detected(NumberedRect),
    NothingDetected,
    BlackWhite(bool),
    Contour(bool),
    Reset,
    PreviewWritten(PathBuf),
    Listing(Vec<NumberedRect>),
    Exported(ExportReport),
    Quit,
    /// The command is not available in the current state.
    Unavailable(&'static str),
}

pub struct Workbench<B: ImageBackend> {
    backend: B,
    source: PathBuf,
    session: RegionSession,
    export: ExportSettings,
    detect: DetectOptions,
    contour: bool,
    black_white: bool,
    finished: bool,
}

impl<B: ImageBackend> Workbench<B> {
    /// Identify `source` and start an empty session on it.
    pub fn open(
        backend: B,
        source: &Path,
        config: &CropperConfig,
    ) -> Result<Self, WorkbenchError> {
        let dims = get_dimensions(&backend, source)?;
        log::debug!("opened {} ({}x{})", source.display(), dims.0, dims.1);
        Ok(Self {
            backend,
            source: source.to_path_buf(),
            session: RegionSession::new(dims, config.session_settings()),
            export: config.export_settings(),
            detect: config.detect_options(),
            contour: false,
            black_white: false,
            finished: false,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn session(&self) -> &RegionSession {
        &self.session
    }

    pub fn contour(&self) -> bool {
        self.contour
    }

    pub fn black_white(&self) -> bool {
        self.black_white
    }

    /// True once the session was exported or abandoned.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one command.
    ///
    /// Only I/O (detection, preview, export) can fail; every other command
    /// returns an event, possibly [`Event::Unavailable`].
    pub fn apply(&mut self, command: &Command) -> Result<Event, WorkbenchError> {
        let event = match command {
            Command::Press(at) => {
                self.session.begin_drag(*at);
                Event::DragStarted(*at)
            }
            Command::Move(at) => match self.session.update_drag(*at) {
                Some(preview) => Event::DragPreview(preview),
                None => Event::Unavailable("no drag in progress"),
            },
            Command::Release(at) => Event::Drag(self.session.commit_drag(*at)),
            Command::Drag(from, to) => {
                Event::Drag(self.session.commit_screen_rect(Rect::from_points(*from, *to)))
            }
            Command::Zoom => {
                self.session.arm_zoom();
                Event::ZoomArmed
            }
            Command::CancelZoom => {
                self.session.disarm_zoom();
                Event::ZoomCancelled
            }
            Command::Unzoom if self.session.can_unzoom() => {
                self.session.reset_view();
                Event::Unzoomed
            }
            Command::Unzoom => Event::Unavailable("not zoomed in"),
            Command::Plus => match self.session.merge_last_two() {
                Some(rect) => Event::Merged {
                    index: self.session.len(),
                    rect,
                },
                None => Event::Unavailable("plus needs at least two regions"),
            },
            Command::Undo => match self.session.undo() {
                Some(rect) => Event::Undone {
                    rect,
                    remaining: self.session.len(),
                },
                None => Event::Unavailable("nothing to undo"),
            },
            Command::Auto => self.auto_detect()?,
            Command::Bw => {
                self.black_white = !self.black_white;
                Event::BlackWhite(self.black_white)
            }
            Command::Contour => {
                self.contour = !self.contour;
                Event::Contour(self.contour)
            }
            Command::Reset => {
                self.session.reset_all();
                self.contour = false;
                self.black_white = false;
                Event::Reset
            }
            Command::Preview(path) => {
                self.write_preview(path)?;
                Event::PreviewWritten(path.clone())
            }
            Command::List => Event::Listing(self.session.exported()),
            Command::Crops if self.session.can_export() => {
                let report = export(
                    &self.backend,
                    &self.source,
                    self.session.image_size(),
                    &self.session.exported(),
                    &self.export,
                )?;
                self.finished = true;
                Event::Exported(report)
            }
            Command::Crops => Event::Unavailable("no regions to export"),
            Command::Quit => {
                self.finished = true;
                Event::Quit
            }
        };

        if let Event::Unavailable(reason) = &event {
            log::debug!("`{command}` skipped: {reason}");
        }
        Ok(event)
    }

    /// Add the content box of the current view.
    fn auto_detect(&mut self) -> Result<Event, WorkbenchError> {
        let region = self.session.view().region();
        let luma = self.backend.load_luma(&self.source, region)?;
        let options = DetectOptions {
            binarize: self.detect.binarize || self.black_white,
            ..self.detect
        };
        Ok(match detect(&luma, &options) {
            Some(local) => Event::Detected(self.session.add_detection(local)),
            None => {
                log::info!("auto: nothing found in {region}");
                Event::NothingDetected
            }
        })
    }

    fn write_preview(&self, path: &Path) -> Result<(), WorkbenchError> {
        let params = plan_preview(
            &self.source,
            path,
            self.session.view(),
            self.session.settings().canvas_margin,
            self.contour,
            self.session.screen_rects(),
        );
        create_preview(&self.backend, &params)?;
        Ok(())
    }
}
