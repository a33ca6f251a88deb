//! User intents and their dispatch into the viewer.
//!
//! Kept free of egui so the wiring can be exercised headless.

use std::path::PathBuf;

use pdf_viewer_core::{DisplayList, DocumentSource, LoadOutcome, Viewer, ViewerError};

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Result of the file dialog; `None` when it was dismissed.
    Load(Option<PathBuf>),
    PreviousPage,
    NextPage,
    ZoomIn,
    ZoomOut,
    ScrollCanvas(f32),
    DismissError,
}

/// Error dialog state
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialogState {
    pub title: String,
    pub message: String,
}

pub struct Shell<S: DocumentSource> {
    viewer: Viewer<S>,
    display: DisplayList,
    error_dialog: Option<ErrorDialogState>,
}

impl<S: DocumentSource> Shell<S> {
    pub fn new(viewer: Viewer<S>) -> Self {
        Self { viewer, display: DisplayList::new(), error_dialog: None }
    }

    pub fn viewer(&self) -> &Viewer<S> {
        &self.viewer
    }

    pub fn display(&self) -> &DisplayList {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayList {
        &mut self.display
    }

    pub fn error_dialog(&self) -> Option<&ErrorDialogState> {
        self.error_dialog.as_ref()
    }

    pub fn handle(&mut self, intent: Intent) {
        let (action, result): (&str, Result<(), ViewerError>) = match intent {
            Intent::Load(path) => {
                ("open PDF", self.viewer.load(path.as_deref(), &mut self.display).map(|outcome| {
                    if let LoadOutcome::Loaded { page_count } = outcome {
                        log::debug!("showing {page_count} pages");
                    }
                }))
            }
            Intent::PreviousPage => {
                self.viewer.previous_page(&mut self.display);
                return;
            }
            Intent::NextPage => {
                self.viewer.next_page(&mut self.display);
                return;
            }
            Intent::ZoomIn => ("zoom in", self.viewer.zoom_in(&mut self.display).map(drop)),
            Intent::ZoomOut => ("zoom out", self.viewer.zoom_out(&mut self.display).map(drop)),
            Intent::ScrollCanvas(position) => {
                self.viewer.scroll_canvas(position, &mut self.display);
                return;
            }
            Intent::DismissError => {
                self.error_dialog = None;
                return;
            }
        };

        if let Err(err) = result {
            log::error!("failed to {action}: {err}");
            self.error_dialog = Some(ErrorDialogState {
                title: "Error".to_owned(),
                message: format!("Failed to {action}: {err}"),
            });
        }
    }
}
