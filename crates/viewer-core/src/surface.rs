//! The Presentation Surface seam and a recording implementation of it.

use crate::geometry::{Point, Rect};

/// Names a cached page bitmap without borrowing it.
///
/// `generation` changes every time the page collection is rebuilt, so
/// `(page_index, generation)` is a stable texture cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub page_index: usize,
    pub generation: u64,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    pub fn rect_at(&self, origin: Point) -> Rect {
        Rect::new(origin.x, origin.y, self.width as f32, self.height as f32)
    }
}

pub trait Surface {
    fn clear(&mut self);
    fn draw_image(&mut self, image: ImageRef, origin: Point);
    fn draw_text(&mut self, origin: Point, text: &str);
    fn set_scroll_extent(&mut self, extent: Rect);
    fn set_horizontal_scroll(&mut self, position: f32);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Image { image: ImageRef, origin: Point },
    Text { origin: Point, text: String },
}

/// Records draw commands for a painter to replay every frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    scroll_extent: Option<Rect>,
    horizontal_scroll: f32,
    scroll_request: Option<f32>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn scroll_extent(&self) -> Option<Rect> {
        self.scroll_extent
    }

    pub fn horizontal_scroll(&self) -> f32 {
        self.horizontal_scroll
    }

    /// Scroll position set since the last call, if any.
    pub fn take_scroll_request(&mut self) -> Option<f32> {
        self.scroll_request.take()
    }

    pub fn image(&self) -> Option<(ImageRef, Point)> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Image { image, origin } => Some((*image, *origin)),
            DrawCommand::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (Point, &str)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { origin, text } => Some((*origin, text.as_str())),
            DrawCommand::Image { .. } => None,
        })
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.scroll_extent = None;
    }

    fn draw_image(&mut self, image: ImageRef, origin: Point) {
        self.commands.push(DrawCommand::Image { image, origin });
    }

    fn draw_text(&mut self, origin: Point, text: &str) {
        self.commands.push(DrawCommand::Text { origin, text: text.to_owned() });
    }

    fn set_scroll_extent(&mut self, extent: Rect) {
        self.scroll_extent = Some(extent);
    }

    fn set_horizontal_scroll(&mut self, position: f32) {
        let position = position.max(0.0);
        self.horizontal_scroll = position;
        self.scroll_request = Some(position);
    }
}
