//! Painting of the viewer's display list onto an egui canvas.

use std::collections::HashMap;

use eframe::egui;
use pdf_viewer_core::{DisplayList, DocumentSource, DrawCommand, ImageRef, PageBitmap, Viewer};

/// Space left past the drawn content so the page never touches the scrollbars.
const CANVAS_MARGIN: f32 = 50.0;

const OVERLAY_TEXT_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 110);

/// Page textures for the current raster generation, uploaded on first use.
#[derive(Default)]
pub struct PageTextures {
    generation: u64,
    textures: HashMap<usize, egui::TextureHandle>,
}

impl PageTextures {
    pub fn texture_id(
        &mut self,
        ctx: &egui::Context,
        image: ImageRef,
        bitmap: Option<&PageBitmap>,
    ) -> Option<egui::TextureId> {
        if image.generation != self.generation {
            self.textures.clear();
            self.generation = image.generation;
        }

        if let Some(handle) = self.textures.get(&image.page_index) {
            return Some(handle.id());
        }

        let bitmap = bitmap?;
        let color_image = egui::ColorImage::from_rgb(
            [bitmap.width() as usize, bitmap.height() as usize],
            bitmap.as_raw(),
        );
        let handle = ctx.load_texture(
            format!("page_{}_{}", image.page_index, image.generation),
            color_image,
            egui::TextureOptions::LINEAR,
        );
        let id = handle.id();
        self.textures.insert(image.page_index, handle);

        Some(id)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.textures.len()
    }
}

/// Replay `display` inside the current (scrolled) ui.
pub fn paint<S: DocumentSource>(
    ui: &mut egui::Ui,
    textures: &mut PageTextures,
    viewer: &Viewer<S>,
    display: &DisplayList,
    font_size: f32,
) {
    let Some(extent) = display.scroll_extent() else {
        return;
    };

    let size = egui::vec2(
        extent.max_x().max(0.0) + CANVAS_MARGIN,
        extent.max_y().max(0.0) + CANVAS_MARGIN,
    );
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let base = response.rect.min.to_vec2();

    for command in display.commands() {
        match command {
            DrawCommand::Image { image, origin } => {
                let bitmap = viewer.page_bitmap(image.page_index);
                let Some(texture) = textures.texture_id(ui.ctx(), *image, bitmap) else {
                    log::warn!("no bitmap for page {}", image.page_index + 1);
                    continue;
                };

                let rect = egui::Rect::from_min_size(
                    egui::pos2(origin.x, origin.y) + base,
                    egui::vec2(image.width as f32, image.height as f32),
                );
                painter.image(
                    texture,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            DrawCommand::Text { origin, text } => {
                painter.text(
                    egui::pos2(origin.x, origin.y) + base,
                    egui::Align2::LEFT_TOP,
                    text,
                    egui::FontId::proportional(font_size),
                    OVERLAY_TEXT_COLOR,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(page_index: usize, generation: u64) -> ImageRef {
        ImageRef { page_index, generation, width: 4, height: 2 }
    }

    #[test]
    fn textures_are_reused_within_a_generation() {
        let ctx = egui::Context::default();
        let bitmap = PageBitmap::new(4, 2);
        let mut textures = PageTextures::default();

        let first = textures.texture_id(&ctx, image(0, 1), Some(&bitmap));
        let again = textures.texture_id(&ctx, image(0, 1), None);

        assert!(first.is_some());
        assert_eq!(first, again);
        assert_eq!(textures.len(), 1);
    }

    #[test]
    fn new_generation_drops_old_textures() {
        let ctx = egui::Context::default();
        let bitmap = PageBitmap::new(4, 2);
        let mut textures = PageTextures::default();
        textures.texture_id(&ctx, image(0, 1), Some(&bitmap));
        textures.texture_id(&ctx, image(1, 1), Some(&bitmap));
        assert_eq!(textures.len(), 2);

        let rebuilt = textures.texture_id(&ctx, image(0, 2), Some(&bitmap));

        assert!(rebuilt.is_some());
        assert_eq!(textures.len(), 1);
    }

    #[test]
    fn missing_bitmap_yields_no_texture() {
        let ctx = egui::Context::default();
        let mut textures = PageTextures::default();

        assert!(textures.texture_id(&ctx, image(3, 1), None).is_none());
    }
}
