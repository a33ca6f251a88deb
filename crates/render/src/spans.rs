//! Grouping of positioned characters into text spans.

use pdf_viewer_core::{Rect, TextSpan};

/// Accumulates characters into whitespace-separated spans.
///
/// Each span's bounds is the union of its characters' bounds.
#[derive(Debug, Default)]
pub struct SpanGrouper {
    spans: Vec<TextSpan>,
    text: String,
    bounds: Option<Rect>,
}

impl SpanGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char, bounds: Rect) {
        if c.is_whitespace() {
            self.flush();
            return;
        }

        self.text.push(c);
        self.bounds = Some(match self.bounds {
            Some(current) => current.union(&bounds),
            None => bounds,
        });
    }

    pub fn finish(mut self) -> Vec<TextSpan> {
        self.flush();
        self.spans
    }

    fn flush(&mut self) {
        if let Some(bounds) = self.bounds.take() {
            self.spans.push(TextSpan::new(bounds, std::mem::take(&mut self.text)));
        }
        self.text.clear();
    }
}
