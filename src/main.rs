use std::path::PathBuf;

use eframe::egui;
use used_car_explorer::app::UsedCarApp;
use used_car_explorer::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path: `used-car-explorer listings.csv`
    let mut state = AppState::default();
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Used Car Price Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(UsedCarApp::new(state)))),
    )
}
