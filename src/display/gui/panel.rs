// src/display/gui/panel.rs v1
//! Static image panel

use super::upload_texture;
use crate::display::LoadedImage;
use eframe::egui;

/// Draws one image at its natural size, offset from the panel's corner
pub struct StaticPanel {
    pending_image: Option<LoadedImage>,
    texture: Option<egui::TextureHandle>,
    image_size: (u32, u32),
    offset: egui::Vec2,
}

impl StaticPanel {
    pub fn new(image: LoadedImage, offset: [f32; 2]) -> Self {
        Self {
            image_size: image.size(),
            pending_image: Some(image),
            texture: None,
            offset: egui::vec2(offset[0], offset[1]),
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui) {
        if let Some(image) = self.pending_image.take() {
            self.texture = Some(upload_texture(ui.ctx(), &image));
        }

        let Some(texture) = &self.texture else {
            ui.weak("No image");
            return;
        };

        let pixels_per_point = ui.ctx().pixels_per_point();
        let (width, height) = self.image_size;
        let size = egui::vec2(width as f32, height as f32) / pixels_per_point;

        let origin = ui.max_rect().min + self.offset;
        ui.painter().image(
            texture.id(),
            egui::Rect::from_min_size(origin, size),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}
