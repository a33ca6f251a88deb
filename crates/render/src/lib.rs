//! PDF Viewer Render Library
//!
//! Document Source backed by PDFium: page rasterization and positioned text.

pub mod pdf;
pub mod spans;

pub use pdf::{PdfiumDocument, PdfiumSource};
pub use spans::SpanGrouper;
