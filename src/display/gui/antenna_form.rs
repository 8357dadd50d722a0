// src/display/gui/antenna_form.rs v2
//! Antenna entry form and the list of recorded antennas

use crate::antenna::{Antenna, AntennaLog};
use chrono::{DateTime, Local};
use eframe::egui;
use tracing::error;

/// What the surrounding app should do after a form frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    ShowList,
    Quit,
}

struct AntennaRow {
    antenna: Antenna,
    added_at: DateTime<Local>,
}

pub struct AntennaForm {
    name: String,
    x: String,
    y: String,
    rows: Vec<AntennaRow>,
    log: AntennaLog,
    status_message: Option<(String, bool)>,
}

impl AntennaForm {
    pub fn new(log: AntennaLog) -> Self {
        Self {
            name: String::new(),
            x: String::new(),
            y: String::new(),
            rows: Vec::new(),
            log,
            status_message: None,
        }
    }

    pub fn render(&mut self, ui: &mut egui::Ui) -> FormAction {
        let mut action = FormAction::None;

        ui.group(|ui| {
            ui.strong("New Antenna");
            ui.separator();

            egui::Grid::new("antenna_fields")
                .num_columns(2)
                .spacing([10.0, 5.0])
                .show(ui, |ui| {
                    ui.label("Antenna name:");
                    ui.text_edit_singleline(&mut self.name);
                    ui.end_row();

                    ui.label("X:");
                    ui.text_edit_singleline(&mut self.x);
                    ui.end_row();

                    ui.label("Y:");
                    ui.text_edit_singleline(&mut self.y);
                    ui.end_row();
                });

            ui.add_space(5.0);

            let can_add = !self.name.trim().is_empty() && !self.x.trim().is_empty() && !self.y.trim().is_empty();

            ui.horizontal(|ui| {
                if ui.button("⬅ Previous").clicked() {
                    action = FormAction::ShowList;
                }
                if ui.button("❌ Quit").clicked() {
                    action = FormAction::Quit;
                }
                if ui.add_enabled(can_add, egui::Button::new("➕ Add")).clicked() {
                    self.submit();
                }
            });
        });

        if let Some((ref msg, ok)) = self.status_message {
            ui.add_space(5.0);
            let color = if ok { egui::Color32::GREEN } else { egui::Color32::YELLOW };
            ui.colored_label(color, msg);
        }

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.strong(format!("Added this session ({})", self.rows.len()));
            ui.separator();

            if self.rows.is_empty() {
                ui.weak("No antennas added yet");
                return;
            }

            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                egui::Grid::new("antenna_rows")
                    .num_columns(4)
                    .spacing([10.0, 5.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("X");
                        ui.strong("Y");
                        ui.strong("Time");
                        ui.end_row();

                        for row in &self.rows {
                            ui.label(&row.antenna.name);
                            ui.monospace(row.antenna.x_text());
                            ui.monospace(row.antenna.y_text());
                            ui.monospace(row.added_at.format("%H:%M:%S").to_string());
                            ui.end_row();
                        }
                    });
            });
        });

        action
    }

    /// Add the entered antenna to the table and append it to the log file.
    /// A failed write is logged and reported; the row stays in the table.
    fn submit(&mut self) {
        let antenna = match Antenna::parse(&self.name, &self.x, &self.y) {
            Ok(antenna) => antenna,
            Err(e) => {
                self.status_message = Some((e.to_string(), false));
                return;
            }
        };

        let result = self.log.append(&antenna);
        let name = antenna.name.clone();
        self.rows.push(AntennaRow {
            antenna,
            added_at: Local::now(),
        });

        match result {
            Ok(()) => {
                self.status_message = Some((format!("✓ Antenna '{}' saved", name), true));
                self.name.clear();
                self.x.clear();
                self.y.clear();
            }
            Err(e) => {
                error!("Failed to write {}: {}", self.log.path().display(), e);
                self.status_message = Some((format!("✗ Could not write antenna file: {}", e), false));
            }
        }
    }
}

/// Read-only table of every antenna in the log file
pub struct AntennaList {
    log: AntennaLog,
    records: Vec<Antenna>,
    error: Option<String>,
    loaded: bool,
}

impl AntennaList {
    pub fn new(log: AntennaLog) -> Self {
        Self {
            log,
            records: Vec::new(),
            error: None,
            loaded: false,
        }
    }

    /// Re-read the file on the next frame
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }

    fn reload(&mut self) {
        match self.log.load() {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.log.path().display(), e);
                self.error = Some(e.to_string());
            }
        }
        self.loaded = true;
    }

    /// Returns true when the user asks to go back to the entry form
    pub fn render(&mut self, ui: &mut egui::Ui) -> bool {
        if !self.loaded {
            self.reload();
        }

        let mut open_form = false;

        ui.horizontal(|ui| {
            ui.strong(format!("Antennas ({})", self.records.len()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("➕ Add antenna").clicked() {
                    open_form = true;
                }
                if ui.button("🔄 Reload").clicked() {
                    self.reload();
                }
            });
        });
        ui.monospace(self.log.path().display().to_string());
        ui.separator();

        if let Some(ref e) = self.error {
            ui.colored_label(egui::Color32::YELLOW, format!("⚠ {}", e));
        }

        if self.records.is_empty() {
            ui.weak("No antennas recorded");
        } else {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("antenna_list")
                    .num_columns(3)
                    .spacing([10.0, 5.0])
                    .striped(true)
                    .show(ui, |ui| {
                        ui.strong("Name");
                        ui.strong("X");
                        ui.strong("Y");
                        ui.end_row();

                        for antenna in &self.records {
                            ui.label(&antenna.name);
                            ui.monospace(antenna.x_text());
                            ui.monospace(antenna.y_text());
                            ui.end_row();
                        }
                    });
            });
        }

        open_form
    }
}
