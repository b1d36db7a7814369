//! Traffic Dashboard - CSV Accident Analysis & Interactive Chart Viewer

use anyhow::Context;
use eframe::egui;
use traffic_dashboard::config::DashboardSettings;
use traffic_dashboard::data::Dataset;
use traffic_dashboard::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = DashboardSettings::load();

    // A failed load stops here, before any window or chart exists
    let dataset = Dataset::open(&settings.data_path)
        .inspect_err(|e| log::error!("{}", e))
        .with_context(|| format!("cannot start without {}", settings.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Traffic Accident Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Traffic Accident Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &settings, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
