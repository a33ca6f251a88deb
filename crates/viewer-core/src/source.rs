//! The Document Source seam.
//!
//! A source turns a file path into an owned document handle. Dropping the
//! handle releases the document, so whoever holds it decides its lifetime.

use std::path::Path;

use crate::error::SourceError;
use crate::geometry::Rect;

/// A rasterized page: RGB, three bytes per pixel.
pub type PageBitmap = image::RgbImage;

/// A run of text and its bounding box in page points (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub bounds: Rect,
    pub text: String,
}

impl TextSpan {
    pub fn new(bounds: Rect, text: impl Into<String>) -> Self {
        Self { bounds, text: text.into() }
    }
}

pub trait DocumentSource {
    type Document: Document;

    fn open(&self, path: &Path) -> Result<Self::Document, SourceError>;
}

pub trait Document {
    fn page_count(&self) -> usize;

    /// Rasterize a page at `scale` pixels per point.
    fn rasterize(&self, page_index: usize, scale: f32) -> Result<PageBitmap, SourceError>;

    /// Text runs of a page in reading order.
    fn text_spans(&self, page_index: usize) -> Result<Vec<TextSpan>, SourceError>;
}

/// Pixel dimensions of a page rasterized at `scale`.
///
/// One pixel per point at 1.0; never smaller than 1x1.
pub fn scaled_dimensions(width_pt: f32, height_pt: f32, scale: f32) -> (u32, u32) {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let width = (width_pt * scale).round().max(1.0) as u32;
    let height = (height_pt * scale).round().max(1.0) as u32;

    (width, height)
}
