//! Control Panel Widget
//! Left side panel with the data source and the three multi-select filters.

use crate::charts::ChartPlotter;
use crate::data::{FilterOptions, FilterSelection};
use egui::{Color32, RichText, ScrollArea};
use std::collections::HashSet;
use std::path::PathBuf;

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub options: FilterOptions,
    pub selection: FilterSelection,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            options: FilterOptions::default(),
            selection: FilterSelection::default(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the available options after a load and select all of them
    pub fn reset_filters(&mut self, options: FilterOptions) {
        self.selection = FilterSelection::all(&options);
        self.options = options;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚦 Traffic Accidents")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Analysis Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file loaded".to_string());

                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open CSV").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("⚙️ Filters").size(14.0).strong());
        ui.add_space(5.0);

        let groups = [
            ("Select City:", &self.options.cities, &mut self.selection.cities),
            ("Select Weather:", &self.options.weather, &mut self.selection.weather),
            ("Select Severity:", &self.options.severities, &mut self.selection.severities),
        ];
        for (title, values, selected) in groups {
            if Self::multi_select(ui, title, values, selected) {
                action = ControlPanelAction::FiltersChanged;
            }
            ui.add_space(8.0);
        }

        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Checkbox list over `values`; returns true when `selected` changed
    fn multi_select(
        ui: &mut egui::Ui,
        title: &str,
        values: &[String],
        selected: &mut HashSet<String>,
    ) -> bool {
        let mut changed = false;

        ui.label(format!("{} ({}/{})", title, selected.len(), values.len()));
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(title)
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for value in values {
                            let mut checked = selected.contains(value);
                            let label = ChartPlotter::display_label(value);
                            if ui.checkbox(&mut checked, label).changed() {
                                if checked {
                                    selected.insert(value.clone());
                                } else {
                                    selected.remove(value);
                                }
                                changed = true;
                            }
                        }
                    });
            });

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                selected.extend(values.iter().cloned());
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                selected.clear();
                changed = true;
            }
        });

        changed
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FiltersChanged,
}
