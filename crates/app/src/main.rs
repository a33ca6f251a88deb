//! PDF Viewer
//!
//! Opens a PDF, shows one rasterized page at a time with its text overlaid,
//! and pages and zooms through the document.

mod app;
mod canvas;
mod shell;

use eframe::egui;
use pdf_viewer_core::{Viewer, ViewerConfig};
use pdf_viewer_render::PdfiumSource;

use crate::app::ViewerApp;
use crate::shell::Shell;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load();

    let source = match PdfiumSource::new() {
        Ok(source) => source,
        Err(err) => {
            log::error!("{err}");
            eprintln!("pdf-viewer: {err}");
            std::process::exit(1);
        }
    };

    let shell = Shell::new(Viewer::new(source, &config));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([400.0, 300.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    let app_name = config.window.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, shell, &config)))),
    )
}
