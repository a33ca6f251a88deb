//! PDF Viewer core
//!
//! The viewer controller and the two seams it drives: a [`DocumentSource`] that
//! opens and rasterizes PDF pages, and a [`Surface`] that receives draw commands.
//! Nothing in this crate depends on a PDF library or a UI toolkit.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod source;
pub mod surface;
pub mod zoom;

pub use config::{ConfigError, ViewerConfig, WindowConfig};
pub use controller::{LoadOutcome, Viewer};
pub use error::{SourceError, ViewerError};
pub use geometry::{Point, Rect};
pub use source::{Document, DocumentSource, PageBitmap, TextSpan};
pub use surface::{DisplayList, DrawCommand, ImageRef, Surface};
pub use zoom::{Zoom, ZoomLimits};
