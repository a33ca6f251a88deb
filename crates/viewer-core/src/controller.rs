//! Viewer controller
//!
//! Owns the open document, its rasterized pages, the current page and the
//! zoom. Every user intent mutates that state and then redraws the current
//! page into a [`Surface`] from scratch.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::geometry::Point;
use crate::source::{Document, DocumentSource, PageBitmap};
use crate::surface::{ImageRef, Surface};
use crate::zoom::Zoom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file dialog was dismissed.
    Cancelled,
    Loaded { page_count: usize },
}

struct OpenDocument<D> {
    path: PathBuf,
    document: D,
}

pub struct Viewer<S: DocumentSource> {
    source: S,
    document: Option<OpenDocument<S::Document>>,
    pages: Vec<PageBitmap>,
    current_page: usize,
    zoom: Zoom,
    generation: u64,
    viewport_origin: Point,
    indicator: String,
}

impl<S: DocumentSource> Viewer<S> {
    pub fn new(source: S, config: &ViewerConfig) -> Self {
        Self {
            source,
            document: None,
            pages: Vec::new(),
            current_page: 0,
            zoom: Zoom::new(config.zoom),
            generation: 0,
            viewport_origin: config.viewport_origin,
            indicator: String::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document.as_ref().map(|open| open.path.as_path())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom.factor()
    }

    /// Text of the page indicator, empty until a document has been rendered.
    pub fn page_indicator(&self) -> &str {
        &self.indicator
    }

    pub fn page_bitmap(&self, page_index: usize) -> Option<&PageBitmap> {
        self.pages.get(page_index)
    }

    /// Bumped whenever the page collection is rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Open `path` and rasterize all of its pages at the current zoom.
    ///
    /// `None` means the user cancelled the file dialog. The current page index
    /// carries over from the previous document, clamped to the new page count.
    /// On error nothing changes: the previous document stays open.
    pub fn load(
        &mut self,
        path: Option<&Path>,
        surface: &mut impl Surface,
    ) -> Result<LoadOutcome, ViewerError> {
        let Some(path) = path else {
            debug!("load cancelled");
            return Ok(LoadOutcome::Cancelled);
        };

        let started = Instant::now();
        let document = self.source.open(path)?;
        let page_count = document.page_count();
        if page_count == 0 {
            return Err(ViewerError::EmptyDocument(path.to_path_buf()));
        }

        let pages = rasterize_all(&document, self.zoom.factor())?;

        // replacing the handle drops the previous document
        self.document = Some(OpenDocument { path: path.to_path_buf(), document });
        self.pages = pages;
        self.generation += 1;
        self.current_page = self.current_page.min(page_count - 1);

        info!(
            "loaded {} ({} pages, zoom {:.3}) in {:?}",
            path.display(),
            page_count,
            self.zoom.factor(),
            started.elapsed()
        );

        self.render(surface);
        Ok(LoadOutcome::Loaded { page_count })
    }

    /// Redraw the current page. Does nothing until a document is loaded.
    ///
    /// A page whose text cannot be extracted is drawn without its overlay.
    pub fn render(&mut self, surface: &mut impl Surface) {
        let Some(open) = &self.document else {
            return;
        };
        let Some(bitmap) = self.pages.get(self.current_page) else {
            return;
        };

        let spans = open.document.text_spans(self.current_page).unwrap_or_else(|err| {
            warn!("drawing page {} without text overlay: {err}", self.current_page + 1);
            Vec::new()
        });
        self.indicator = format!("Page {} / {}", self.current_page + 1, self.pages.len());

        let origin = self.viewport_origin;
        let zoom = self.zoom.factor();
        let image = ImageRef {
            page_index: self.current_page,
            generation: self.generation,
            width: bitmap.width(),
            height: bitmap.height(),
        };

        surface.clear();
        surface.draw_image(image, origin);

        let mut extent = image.rect_at(origin);
        for span in &spans {
            let placed = span.bounds.scaled(zoom).translated(origin);
            surface.draw_text(placed.origin(), &span.text);
            extent = extent.union(&placed);
        }

        surface.set_scroll_extent(extent);
    }

    pub fn next_page(&mut self, surface: &mut impl Surface) -> bool {
        if self.current_page + 1 >= self.pages.len() {
            debug!("next page ignored at page {}", self.current_page + 1);
            return false;
        }

        self.current_page += 1;
        self.render(surface);
        true
    }

    pub fn previous_page(&mut self, surface: &mut impl Surface) -> bool {
        if self.current_page == 0 || self.pages.is_empty() {
            debug!("previous page ignored at page {}", self.current_page + 1);
            return false;
        }

        self.current_page -= 1;
        self.render(surface);
        true
    }

    pub fn zoom_in(&mut self, surface: &mut impl Surface) -> Result<bool, ViewerError> {
        self.step_zoom(Zoom::zoom_in, surface)
    }

    pub fn zoom_out(&mut self, surface: &mut impl Surface) -> Result<bool, ViewerError> {
        self.step_zoom(Zoom::zoom_out, surface)
    }

    /// Forward a horizontal scroll position to the surface.
    pub fn scroll_canvas(&mut self, position: f32, surface: &mut impl Surface) {
        surface.set_horizontal_scroll(position);
    }

    fn step_zoom(
        &mut self,
        step: fn(&mut Zoom) -> bool,
        surface: &mut impl Surface,
    ) -> Result<bool, ViewerError> {
        let previous = self.zoom;
        if !step(&mut self.zoom) {
            debug!("zoom unchanged at {:.3}", self.zoom.factor());
            return Ok(false);
        }

        let Some(open) = &self.document else {
            return Ok(true);
        };

        let started = Instant::now();
        match rasterize_all(&open.document, self.zoom.factor()) {
            Ok(pages) => {
                self.pages = pages;
                self.generation += 1;
            }
            Err(err) => {
                self.zoom = previous;
                return Err(err);
            }
        }
        debug!(
            "rebuilt {} pages at zoom {:.3} in {:?}",
            self.pages.len(),
            self.zoom.factor(),
            started.elapsed()
        );

        self.render(surface);
        Ok(true)
    }
}

fn rasterize_all<D: Document>(document: &D, scale: f32) -> Result<Vec<PageBitmap>, ViewerError> {
    (0..document.page_count())
        .map(|index| document.rasterize(index, scale).map_err(ViewerError::from))
        .collect()
}
