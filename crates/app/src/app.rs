use std::path::PathBuf;

use eframe::egui;
use pdf_viewer_core::{DocumentSource, ViewerConfig};

use crate::canvas::{self, PageTextures};
use crate::shell::{Intent, Shell};

pub struct ViewerApp<S: DocumentSource> {
    shell: Shell<S>,
    textures: PageTextures,
    overlay_font_size: f32,
    base_title: String,
    titled_path: Option<PathBuf>,
}

impl<S: DocumentSource> ViewerApp<S> {
    pub fn new(cc: &eframe::CreationContext<'_>, shell: Shell<S>, config: &ViewerConfig) -> Self {
        // Cmd/Ctrl +/- drive the document zoom, not the UI scale
        cc.egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);

        Self {
            shell,
            textures: PageTextures::default(),
            overlay_font_size: config.overlay_font_size,
            base_title: config.window.title.clone(),
            titled_path: None,
        }
    }
}

/// Ask the user for a PDF file; `None` if the dialog was dismissed.
fn pick_pdf() -> Option<PathBuf> {
    rfd::FileDialog::new().add_filter("PDF Files", &["pdf"]).pick_file()
}

impl<S: DocumentSource> eframe::App for ViewerApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut intents = self.handle_keyboard_shortcuts(ctx);
        self.draw_toolbar(ctx, &mut intents);
        self.draw_canvas(ctx, &mut intents);
        self.draw_error_dialog(ctx, &mut intents);

        for intent in intents {
            self.shell.handle(intent);
        }

        self.sync_title(ctx);
    }
}

impl<S: DocumentSource> ViewerApp<S> {
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) -> Vec<Intent> {
        let mut intents = Vec::new();
        let mut open_requested = false;
        let dialog_open = self.shell.error_dialog().is_some();

        ctx.input(|i| {
            let cmd_or_ctrl = i.modifiers.command || i.modifiers.ctrl;

            if dialog_open {
                if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter) {
                    intents.push(Intent::DismissError);
                }
                return;
            }

            if cmd_or_ctrl && i.key_pressed(egui::Key::O) {
                open_requested = true;
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::PageUp) {
                intents.push(Intent::PreviousPage);
            }
            if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::PageDown) {
                intents.push(Intent::NextPage);
            }
            if cmd_or_ctrl && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)) {
                intents.push(Intent::ZoomIn);
            }
            if cmd_or_ctrl && i.key_pressed(egui::Key::Minus) {
                intents.push(Intent::ZoomOut);
            }
        });

        // the native dialog blocks, so run it outside the input lock
        if open_requested {
            intents.push(Intent::Load(pick_pdf()));
        }

        intents
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_space(8.0);

                if ui.button("Load PDF").clicked() {
                    intents.push(Intent::Load(pick_pdf()));
                }

                ui.separator();

                if ui.button("Previous Page").clicked() {
                    intents.push(Intent::PreviousPage);
                }
                ui.label(self.shell.viewer().page_indicator());
                if ui.button("Next Page").clicked() {
                    intents.push(Intent::NextPage);
                }

                ui.separator();

                if ui.button("Zoom Out").clicked() {
                    intents.push(Intent::ZoomOut);
                }
                ui.label(format!("{:.0}%", self.shell.viewer().zoom_factor() * 100.0));
                if ui.button("Zoom In").clicked() {
                    intents.push(Intent::ZoomIn);
                }
            });
        });
    }

    fn draw_canvas(&mut self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        egui::CentralPanel::default().frame(egui::Frame::NONE.fill(egui::Color32::WHITE)).show(
            ctx,
            |ui| {
                if !self.shell.viewer().is_loaded() {
                    ui.centered_and_justified(|ui| {
                        ui.weak("Load a PDF to get started");
                    });
                    return;
                }

                let mut scroll_area = egui::ScrollArea::both().auto_shrink([false, false]);
                if let Some(position) = self.shell.display_mut().take_scroll_request() {
                    scroll_area = scroll_area.horizontal_scroll_offset(position);
                }

                let font_size = self.overlay_font_size;
                let output = scroll_area.show(ui, |ui| {
                    canvas::paint(
                        ui,
                        &mut self.textures,
                        self.shell.viewer(),
                        self.shell.display(),
                        font_size,
                    );
                });

                let offset = output.state.offset.x;
                if (offset - self.shell.display().horizontal_scroll()).abs() > 0.5 {
                    intents.push(Intent::ScrollCanvas(offset));
                }
            },
        );
    }

    fn draw_error_dialog(&self, ctx: &egui::Context, intents: &mut Vec<Intent>) {
        let Some(error) = self.shell.error_dialog() else {
            return;
        };

        let title = format!("❌ {}", error.title);
        let message = error.message.clone();

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("OK").clicked() {
                        intents.push(Intent::DismissError);
                    }
                });
            });
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let path = self.shell.viewer().document_path();
        if path == self.titled_path.as_deref() {
            return;
        }

        let title = match path.and_then(|p| p.file_name()) {
            Some(name) => format!("{} - {}", self.base_title, name.to_string_lossy()),
            None => self.base_title.clone(),
        };
        self.titled_path = path.map(|p| p.to_path_buf());
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}
