// src/display/gui/mod.rs v2
//! GUI display module - screens and texture helpers

mod antenna_form;
mod app;
mod panel;
mod viewer;

pub use antenna_form::{AntennaForm, AntennaList, FormAction};
pub use app::{GeoViewerApp, Screen};
pub use panel::StaticPanel;
pub use viewer::ImageViewer;

use super::LoadedImage;
use crate::error::Result;
use eframe::egui;

/// Upload a decoded image as a GPU texture
fn upload_texture(ctx: &egui::Context, image: &LoadedImage) -> egui::TextureHandle {
    let size = [image.width as usize, image.height as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.rgba);
    ctx.load_texture(image.name.clone(), color_image, egui::TextureOptions::LINEAR)
}

/// Open the main window and block until it is closed
pub fn run(app: GeoViewerApp, title: &str, window_size: [f32; 2]) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_title(title)
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
