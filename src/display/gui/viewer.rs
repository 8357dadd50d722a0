// src/display/gui/viewer.rs v1
//! Pannable, zoomable image view with markers and graticule overlay

use super::upload_texture;
use crate::{
    antenna::AntennaLog,
    display::LoadedImage,
    graticule::{Graticule, Metapole},
    marker::MarkerSet,
    viewport::{ImagePoint, ViewState, WidgetSize, ZoomDirection},
};
use eframe::egui;
use tracing::{info, warn};

const GRID_COLOR: egui::Color32 = egui::Color32::GREEN;
const MARKER_COLOR: egui::Color32 = egui::Color32::YELLOW;

pub struct ImageViewer {
    pending_image: Option<LoadedImage>,
    texture: Option<egui::TextureHandle>,
    view: ViewState,
    pub show_grid: bool,
    metapole: Metapole,
    graticule: Graticule,
    markers: MarkerSet,
    antenna_log: AntennaLog,

    // Temporary UI state
    image_path: String,
    pole_lat: f64,
    pole_lon: f64,
    meta_meridian: f64,
    marker_id: String,
    pointer_image: Option<ImagePoint>,
    status_message: Option<String>,
}

impl ImageViewer {
    pub fn new(image: LoadedImage, keep_aspect: bool, antenna_log: AntennaLog) -> Self {
        let (width, height) = image.size();
        let mut viewer = Self {
            pending_image: Some(image),
            texture: None,
            view: ViewState::new(width, height, keep_aspect),
            show_grid: false,
            metapole: Metapole::default(),
            graticule: Graticule::default(),
            markers: MarkerSet::new(),
            antenna_log,
            image_path: String::new(),
            pole_lat: 90.0,
            pole_lon: 0.0,
            meta_meridian: 0.0,
            marker_id: String::new(),
            pointer_image: None,
            status_message: None,
        };
        viewer.create_grid(Metapole::default());
        viewer
    }

    /// Grid settings at startup
    pub fn with_grid(mut self, show_grid: bool, metapole: Metapole) -> Self {
        self.show_grid = show_grid;
        self.create_grid(metapole);
        self
    }

    /// Replace the displayed image; bounds are reset on the next frame
    pub fn set_image(&mut self, image: LoadedImage) {
        let (width, height) = image.size();
        self.view.set_image(width, height);
        self.pending_image = Some(image);
        self.texture = None;
        self.create_grid(self.metapole);
    }

    /// Regenerate the graticule for a new metapole
    pub fn create_grid(&mut self, metapole: Metapole) {
        self.metapole = metapole;
        self.pole_lat = metapole.latitude;
        self.pole_lon = metapole.longitude;
        self.meta_meridian = metapole.meta_meridian;
        let (width, height) = self.view.image_size();
        self.graticule = Graticule::generate(&metapole, width, height);
    }

    pub fn metapole(&self) -> Metapole {
        self.metapole
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn add_marker(&mut self, id: &str, position: ImagePoint) {
        self.markers.add(id, position);
    }

    pub fn remove_marker(&mut self, id: &str) -> bool {
        self.markers.remove(id)
    }

    pub fn pointer_image(&self) -> Option<ImagePoint> {
        self.pointer_image
    }

    /// Place every recorded antenna as a marker
    pub fn import_antennas(&mut self) {
        match self.antenna_log.load() {
            Ok(antennas) => {
                for antenna in &antennas {
                    let position = ImagePoint::new(antenna.x.round() as i32, antenna.y.round() as i32);
                    self.markers.add(&antenna.name, position);
                }
                info!("Imported {} antennas as markers", antennas.len());
                self.status_message = Some(format!("Imported {} antennas", antennas.len()));
            }
            Err(e) => {
                warn!("Could not read {}: {}", self.antenna_log.path().display(), e);
                self.status_message = Some(format!("✗ {}", e));
            }
        }
    }

    fn open_image(&mut self) {
        let path = std::path::PathBuf::from(self.image_path.trim());
        match LoadedImage::open(&path) {
            Ok(image) => {
                self.status_message = Some(format!("Opened {}", image.name));
                self.set_image(image);
            }
            Err(e) => {
                warn!("Could not open {}: {}", path.display(), e);
                self.status_message = Some(format!("✗ {}", e));
            }
        }
    }

    pub fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.strong("🖼 Image");
        ui.separator();

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.image_path);
            let can_open = !self.image_path.trim().is_empty();
            if ui.add_enabled(can_open, egui::Button::new("Open")).clicked() {
                self.open_image();
            }
        });
        let (width, height) = self.view.image_size();
        ui.small(format!("{} x {} px", width, height));

        ui.add_space(10.0);
        ui.strong("🌐 Graticule");
        ui.separator();

        ui.checkbox(&mut self.show_grid, "Show grid");

        egui::Grid::new("metapole_grid")
            .num_columns(2)
            .spacing([10.0, 5.0])
            .show(ui, |ui| {
                ui.label("Pole latitude:");
                ui.add(egui::DragValue::new(&mut self.pole_lat).speed(0.5).suffix("°"));
                ui.end_row();

                ui.label("Pole longitude:");
                ui.add(egui::DragValue::new(&mut self.pole_lon).speed(0.5).suffix("°"));
                ui.end_row();

                ui.label("Meta meridian:");
                ui.add(egui::DragValue::new(&mut self.meta_meridian).speed(0.5).suffix("°"));
                ui.end_row();
            });

        if ui.button("Apply").clicked() {
            let metapole = Metapole::new(
                self.pole_lat.clamp(-90.0, 90.0),
                self.pole_lon.clamp(-180.0, 180.0),
                self.meta_meridian,
            );
            self.create_grid(metapole);
            self.show_grid = true;
        }

        ui.add_space(10.0);
        ui.strong("📍 Markers");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("ID:");
            ui.text_edit_singleline(&mut self.marker_id);
        });
        if self.marker_id.trim().is_empty() {
            ui.small("Enter an ID, then click the image");
        } else {
            ui.small("Click the image to place this marker");
        }

        ui.add_space(5.0);

        let mut to_remove = None;
        if self.markers.is_empty() {
            ui.weak("No markers");
        } else {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                egui::Grid::new("marker_list")
                    .num_columns(3)
                    .spacing([10.0, 5.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for marker in self.markers.iter() {
                            ui.label(&marker.id);
                            ui.monospace(format!("{}, {}", marker.position.x, marker.position.y));
                            if ui.small_button("✖").clicked() {
                                to_remove = Some(marker.id.clone());
                            }
                            ui.end_row();
                        }
                    });
            });
        }
        if let Some(id) = to_remove {
            self.remove_marker(&id);
        }

        ui.horizontal(|ui| {
            if ui.button("📡 Import antennas").clicked() {
                self.import_antennas();
            }
            if ui.button("🗑 Clear").clicked() {
                self.markers.clear();
            }
        });

        if let Some(ref msg) = self.status_message {
            ui.add_space(5.0);
            ui.label(msg);
        }
    }

    pub fn render_canvas(&mut self, ui: &mut egui::Ui) {
        if let Some(image) = self.pending_image.take() {
            self.texture = Some(upload_texture(ui.ctx(), &image));
        }

        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        let widget = WidgetSize::from_f32(rect.width(), rect.height());

        self.view.sync(widget);

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if let (Some(direction), Some(pos)) = (ZoomDirection::from_scroll(scroll), response.hover_pos()) {
                let local = pos - rect.min;
                self.view.viewport_mut().zoom(direction, local.x, local.y, widget);
            }
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.view.viewport_mut().pan(delta.x, delta.y, widget);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                let id = self.marker_id.trim().to_string();
                if !id.is_empty() {
                    let point = self.view.viewport().image_coord(local.x, local.y, widget);
                    self.markers.add(&id, point);
                }
            }
        }

        self.pointer_image = response.hover_pos().map(|pos| {
            let local = pos - rect.min;
            self.view.viewport().image_coord(local.x, local.y, widget)
        });

        self.paint(&painter, rect, widget);
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect, widget: WidgetSize) {
        painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));

        let Some(texture) = &self.texture else {
            return;
        };

        let to_screen = |point: ImagePoint| {
            let (x, y) = self.view.viewport().widget_pos(point, widget);
            rect.min + egui::vec2(x, y)
        };

        let (width, height) = self.view.image_size();
        let image_rect = egui::Rect::from_min_max(
            to_screen(ImagePoint::new(0, 0)),
            to_screen(ImagePoint::new(width as i32, height as i32)),
        );
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        for (marker, (x, y)) in self.markers.visible(self.view.viewport(), widget) {
            let center = rect.min + egui::vec2(x as f32, y as f32);
            painter.rect_filled(
                egui::Rect::from_center_size(center, egui::vec2(3.0, 3.0)),
                0.0,
                MARKER_COLOR,
            );
            painter.text(
                center + egui::vec2(5.0, -5.0),
                egui::Align2::LEFT_BOTTOM,
                &marker.id,
                egui::FontId::proportional(12.0),
                MARKER_COLOR,
            );
        }

        if self.show_grid {
            let stroke = egui::Stroke::new(1.0, GRID_COLOR);
            for (a, b) in self.graticule.segments() {
                painter.line_segment([to_screen(a), to_screen(b)], stroke);
            }
        }
    }
}
