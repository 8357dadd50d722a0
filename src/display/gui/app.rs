// src/display/gui/app.rs v2
//! Main GUI application structure and eframe::App implementation

use super::{AntennaForm, AntennaList, FormAction, ImageViewer, StaticPanel};
use crate::{antenna::AntennaLog, config::ViewerConfig};
use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Viewer,
    Panel,
    AntennaForm,
    AntennaList,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Viewer => "🗺 Viewer",
            Screen::Panel => "🖼 Panel",
            Screen::AntennaForm => "📡 Add Antenna",
            Screen::AntennaList => "📋 Antennas",
        }
    }
}

pub struct GeoViewerApp {
    screen: Screen,
    viewer: Option<ImageViewer>,
    panel: Option<StaticPanel>,
    antenna_form: AntennaForm,
    antenna_list: AntennaList,
    /// Settings in effect, command line overrides included
    config: ViewerConfig,
    /// Settings as read from disk; only this copy is written back
    saved_config: ViewerConfig,
    config_path: Option<PathBuf>,
}

impl GeoViewerApp {
    pub fn new(config: ViewerConfig, saved_config: ViewerConfig, config_path: Option<PathBuf>) -> Self {
        let log = AntennaLog::new(config.antenna_file.clone());
        Self {
            screen: Screen::AntennaForm,
            viewer: None,
            panel: None,
            antenna_form: AntennaForm::new(log.clone()),
            antenna_list: AntennaList::new(log),
            config,
            saved_config,
            config_path,
        }
    }

    pub fn with_viewer(mut self, viewer: ImageViewer) -> Self {
        self.viewer = Some(viewer);
        self.screen = Screen::Viewer;
        self
    }

    pub fn with_panel(mut self, panel: StaticPanel) -> Self {
        self.panel = Some(panel);
        self.screen = Screen::Panel;
        self
    }

    fn available_screens(&self) -> Vec<Screen> {
        let mut screens = Vec::new();
        if self.viewer.is_some() {
            screens.push(Screen::Viewer);
        }
        if self.panel.is_some() {
            screens.push(Screen::Panel);
        }
        screens.push(Screen::AntennaForm);
        screens.push(Screen::AntennaList);
        screens
    }

    fn switch_to(&mut self, screen: Screen) {
        if screen == Screen::AntennaList {
            self.antenna_list.invalidate();
        }
        self.screen = screen;
    }

    /// Persist grid settings changed in the viewer. Everything else in the
    /// saved file stays as it was loaded.
    fn save_config(&mut self) {
        if let Some(ref viewer) = self.viewer {
            let grid = (viewer.show_grid, viewer.metapole());
            if grid != (self.config.show_grid, self.config.metapole) {
                self.saved_config.update_grid(grid.0, grid.1);
            }
        }

        let result = match self.config_path {
            Some(ref path) => self.saved_config.save_to(path),
            None => self.saved_config.save(),
        };

        match result {
            Ok(()) => info!("Configuration saved"),
            Err(e) => warn!("Failed to save configuration: {}", e),
        }
    }
}

impl eframe::App for GeoViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading("🌍 Geo Viewer");
                ui.separator();

                let mut selected = self.screen;
                for screen in self.available_screens() {
                    ui.selectable_value(&mut selected, screen, screen.title());
                }
                if selected != self.screen {
                    self.switch_to(selected);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("❌ Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| match self.screen {
                Screen::Viewer => {
                    if let Some(ref viewer) = self.viewer {
                        match viewer.pointer_image() {
                            Some(p) => ui.monospace(format!("Image: {}, {}", p.x, p.y)),
                            None => ui.weak("Pointer outside image view"),
                        };
                        ui.separator();
                        ui.label(format!("Markers: {}", viewer.markers().len()));
                    }
                }
                Screen::AntennaForm | Screen::AntennaList => {
                    ui.label(format!("Antenna file: {}", self.config.antenna_file.display()));
                }
                Screen::Panel => {
                    ui.weak("Static image");
                }
            });
        });

        if self.screen == Screen::Viewer {
            if let Some(ref mut viewer) = self.viewer {
                egui::SidePanel::right("viewer_controls")
                    .resizable(true)
                    .default_width(260.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            viewer.render_controls(ui);
                        });
                    });
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.screen {
            Screen::Viewer => {
                if let Some(ref mut viewer) = self.viewer {
                    viewer.render_canvas(ui);
                }
            }
            Screen::Panel => {
                if let Some(ref mut panel) = self.panel {
                    panel.render(ui);
                }
            }
            Screen::AntennaForm => match self.antenna_form.render(ui) {
                FormAction::ShowList => self.switch_to(Screen::AntennaList),
                FormAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                FormAction::None => {}
            },
            Screen::AntennaList => {
                if self.antenna_list.render(ui) {
                    self.switch_to(Screen::AntennaForm);
                }
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_config();
    }
}
