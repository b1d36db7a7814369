//! Chart Viewer Widget
//! Central scrollable panel with metric cards, the four charts and the
//! filtered table.

use crate::charts::ChartPlotter;
use crate::data::NormalizedRecord;
use crate::stats::DashboardSummary;
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const TABLE_ROW_HEIGHT: f32 = 20.0;
const TABLE_HEIGHT: f32 = 320.0;

const TABLE_COLUMNS: [(&str, f32); 10] = [
    ("Accident_ID", 90.0),
    ("City", 110.0),
    ("Weather", 90.0),
    ("Road_Type", 100.0),
    ("Severity", 80.0),
    ("Severity_Level", 100.0),
    ("Vehicles_Involved", 120.0),
    ("Vehicles", 70.0),
    ("Casualties", 80.0),
    ("Date", 140.0),
];

/// Render a metric rounded for display; undefined metrics read "n/a".
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => "n/a".to_string(),
    }
}

/// Scrollable dashboard area fed with one summary per filter change.
pub struct ChartViewer {
    pub summary: DashboardSummary,
    /// Filtered rows, owned by the current rendering pass
    pub rows: Vec<NormalizedRecord>,
    pub decimals: usize,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            summary: DashboardSummary::default(),
            rows: Vec::new(),
            decimals: 2,
        }
    }
}

impl ChartViewer {
    pub fn new(decimals: usize) -> Self {
        Self {
            decimals,
            ..Self::default()
        }
    }

    pub fn set_view(&mut self, summary: DashboardSummary, rows: Vec<NormalizedRecord>) {
        self.summary = summary;
        self.rows = rows;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.heading("🚦 Traffic Accident Analysis Dashboard");
        ui.add_space(8.0);

        ScrollArea::vertical()
            .id_salt("dashboard")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.draw_metrics(ui);
                ui.add_space(CARD_SPACING);

                if self.summary.total == 0 {
                    ui.label(
                        RichText::new("No accidents match the current filters")
                            .size(16.0)
                            .color(Color32::GRAY),
                    );
                    return;
                }

                let half = (ui.available_width() - CARD_SPACING) / 2.0;

                ui.horizontal(|ui| {
                    Self::card(ui, half, "📊 Accidents by City", |ui| {
                        ChartPlotter::draw_count_bars(
                            ui,
                            "city_counts",
                            &self.summary.city_counts,
                            "City",
                            ChartPlotter::color(0),
                        );
                    });
                    ui.add_space(CARD_SPACING);
                    Self::card(ui, half, "🌦️ Accidents by Weather Condition", |ui| {
                        ChartPlotter::draw_share_pie(ui, &self.summary.weather_share, 1);
                    });
                });
                ui.add_space(CARD_SPACING);

                ui.horizontal(|ui| {
                    Self::card(ui, half, "🛣️ Road Type Distribution", |ui| {
                        ChartPlotter::draw_count_bars(
                            ui,
                            "road_type_counts",
                            &self.summary.road_type_counts,
                            "Road Type",
                            ChartPlotter::color(2),
                        );
                    });
                    ui.add_space(CARD_SPACING);
                    Self::card(ui, half, "🚗 Vehicles Involved Trend", |ui| {
                        ChartPlotter::draw_trend_line(ui, &self.summary.vehicle_trend);
                    });
                });
                ui.add_space(CARD_SPACING);

                ui.label(RichText::new("Filtered dataset based on your selection:").strong());
                ui.add_space(5.0);
                self.draw_table(ui);
            });
    }

    fn draw_metrics(&self, ui: &mut egui::Ui) {
        let metrics = [
            ("Total Accidents", self.summary.total.to_string()),
            (
                "Avg. Vehicles Involved",
                format_metric(self.summary.mean_vehicles, self.decimals),
            ),
            (
                "Avg. Severity (1 Low, 3 High)",
                format_metric(self.summary.mean_severity, self.decimals),
            ),
        ];
        let width = (ui.available_width() - 2.0 * CARD_SPACING) / 3.0;

        ui.horizontal(|ui| {
            for (label, value) in metrics {
                Self::card(ui, width, label, |ui| {
                    ui.label(RichText::new(value).size(28.0).strong());
                });
                ui.add_space(CARD_SPACING);
            }
        });
    }

    fn card(ui: &mut egui::Ui, width: f32, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(width - 24.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(14.0).strong());
                    ui.add_space(6.0);
                    add_contents(ui);
                });
            });
    }

    fn draw_table(&self, ui: &mut egui::Ui) {
        ScrollArea::horizontal().id_salt("table_h").show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    for (name, width) in TABLE_COLUMNS {
                        ui.add_sized([width, TABLE_ROW_HEIGHT], egui::Label::new(RichText::new(name).strong()));
                    }
                });
                ui.separator();

                ScrollArea::vertical()
                    .id_salt("table_rows")
                    .max_height(TABLE_HEIGHT)
                    .show_rows(ui, TABLE_ROW_HEIGHT, self.rows.len(), |ui, row_range| {
                        for row in &self.rows[row_range] {
                            ui.horizontal(|ui| {
                                for (cell, (_, width)) in Self::cells(row).into_iter().zip(TABLE_COLUMNS) {
                                    ui.add_sized([width, TABLE_ROW_HEIGHT], egui::Label::new(cell).truncate());
                                }
                            });
                        }
                    });
            });
        });
    }

    fn cells(row: &NormalizedRecord) -> [String; 10] {
        let r = &row.record;
        [
            r.accident_id.clone(),
            r.city.clone(),
            r.weather.clone(),
            r.road_type.clone(),
            r.severity.clone(),
            row.severity_level.map(|l| l.to_string()).unwrap_or_default(),
            r.vehicles_involved.clone(),
            row.vehicles_involved_count.to_string(),
            row.casualties_count.to_string(),
            r.date.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metric_rounds() {
        assert_eq!(format_metric(Some(1.666_666), 2), "1.67");
        assert_eq!(format_metric(Some(2.0), 2), "2.00");
        assert_eq!(format_metric(Some(2.345), 0), "2");
    }

    #[test]
    fn test_format_metric_undefined() {
        assert_eq!(format_metric(None, 2), "n/a");
        assert_eq!(format_metric(Some(f64::NAN), 2), "n/a");
    }
}
