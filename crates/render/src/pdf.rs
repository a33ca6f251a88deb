//! PDFium-backed document source
//!
//! Opens PDF files through PDFium, rasterizes pages at a zoom factor and
//! extracts positioned text runs for the overlay.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use pdf_viewer_core::source::scaled_dimensions;
use pdf_viewer_core::{Document, DocumentSource, PageBitmap, Rect, SourceError, TextSpan};
use pdfium_render::prelude::*;

use crate::spans::SpanGrouper;

/// Opens documents through a PDFium binding.
pub struct PdfiumSource {
    /// Bound once and kept for the life of the process; documents borrow it.
    pdfium: &'static Pdfium,
}

impl PdfiumSource {
    /// Bind to the PDFium library
    ///
    /// Search order:
    /// 1. Executable's directory (app bundles ship the library next to the binary)
    /// 2. Current working directory
    /// 3. System library paths
    pub fn new() -> Result<Self, SourceError> {
        let pdfium = Box::leak(Box::new(Self::bind()?));
        Ok(Self { pdfium })
    }

    fn bind() -> Result<Pdfium, SourceError> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()));

        if let Some(ref dir) = exe_dir {
            if let Ok(bindings) =
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            {
                log::info!("bound PDFium from {}", dir.display());
                return Ok(Pdfium::new(bindings));
            }
        }

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| SourceError::Backend(format!("failed to bind PDFium: {e}")))?;

        Ok(Pdfium::new(bindings))
    }
}

impl DocumentSource for PdfiumSource {
    type Document = PdfiumDocument;

    fn open(&self, path: &Path) -> Result<PdfiumDocument, SourceError> {
        let document = self.pdfium.load_pdf_from_file(path, None).map_err(|e| {
            SourceError::Open { path: path.to_path_buf(), reason: e.to_string() }
        })?;

        Ok(PdfiumDocument { document })
    }
}

/// An open PDF. Dropping it closes the document.
pub struct PdfiumDocument {
    document: pdfium_render::prelude::PdfDocument<'static>,
}

impl PdfiumDocument {
    fn page(&self, page_index: usize) -> Result<PdfPage<'_>, SourceError> {
        let out_of_range =
            || SourceError::PageOutOfRange { page: page_index, page_count: self.page_count() };

        let index = u16::try_from(page_index).map_err(|_| out_of_range())?;
        self.document.pages().get(index).map_err(|_| out_of_range())
    }
}

impl Document for PdfiumDocument {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn rasterize(&self, page_index: usize, scale: f32) -> Result<PageBitmap, SourceError> {
        let page = self.page(page_index)?;
        let (width, height) = scaled_dimensions(page.width().value, page.height().value, scale);

        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| SourceError::Render { page: page_index, reason: e.to_string() })?;

        rgba_to_page_bitmap(page_index, width, height, bitmap.as_rgba_bytes())
    }

    fn text_spans(&self, page_index: usize) -> Result<Vec<TextSpan>, SourceError> {
        let page = self.page(page_index)?;
        let page_height = page.height().value;

        let text_page = page
            .text()
            .map_err(|e| SourceError::Text { page: page_index, reason: e.to_string() })?;

        let chars = text_page.chars();
        let mut grouper = SpanGrouper::new();
        for char_result in chars.iter() {
            let Some(c) = char_result.unicode_char() else {
                continue;
            };
            let Ok(bounds) = char_result.loose_bounds() else {
                continue;
            };

            // PDFium reports a bottom-left origin
            let left = bounds.left().value;
            let top = bounds.top().value;
            grouper.push(
                c,
                Rect::new(
                    left,
                    page_height - top,
                    bounds.right().value - left,
                    top - bounds.bottom().value,
                ),
            );
        }

        Ok(grouper.finish())
    }
}

/// Drop the alpha channel of a rendered page, taking ownership of its buffer.
fn rgba_to_page_bitmap(
    page_index: usize,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
) -> Result<PageBitmap, SourceError> {
    let rgba = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| SourceError::Render {
        page: page_index,
        reason: format!("bitmap does not match {width}x{height}"),
    })?;

    Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
}
