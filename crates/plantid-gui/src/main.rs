//! GUI entry point for Plant Identify

mod app;
mod identify_panel;
mod settings_panel;
mod state;

use app::PlantIdApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Plant Identifier",
        options,
        Box::new(|cc| Ok(Box::new(PlantIdApp::new(cc)))),
    )
}
