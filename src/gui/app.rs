//! Traffic Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::config::DashboardSettings;
use crate::data::{filter_records, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::SummaryCalculator;
use egui::SidePanel;

/// Main application window.
pub struct DashboardApp {
    dataset: Dataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: &DashboardSettings,
        dataset: Dataset,
    ) -> Self {
        let mut app = Self {
            dataset,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(settings.metric_decimals),
        };
        app.install_dataset();
        app
    }

    /// Point the controls at the current dataset with every value selected
    fn install_dataset(&mut self) {
        self.control_panel.csv_path = Some(self.dataset.source().to_path_buf());
        self.control_panel.reset_filters(self.dataset.options().clone());
        self.control_panel.set_status(&format!(
            "Loaded {} accidents from {}",
            self.dataset.len(),
            self.dataset.source().display()
        ));
        self.recompute();
    }

    /// Filter and aggregate from scratch for the current selection
    fn recompute(&mut self) {
        let view = filter_records(self.dataset.records(), &self.control_panel.selection);
        let summary = SummaryCalculator::summarize(&view);
        log::debug!(
            "Recomputed view: {} of {} rows",
            view.len(),
            self.dataset.len()
        );

        let rows = view.iter().cloned().collect();
        self.chart_viewer.set_view(summary, rows);
    }

    /// Handle CSV file selection; a failed load keeps the current dataset
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match Dataset::open(&path) {
            Ok(dataset) => {
                self.dataset = dataset;
                self.install_dataset();
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FiltersChanged => self.recompute(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
