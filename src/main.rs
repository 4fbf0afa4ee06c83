mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use app::SnowViewerApp;
use chart::config::ChartConfig;
use data::loader::SeasonSources;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Usage: snow-season-viewer [SEASON_A.csv] [SEASON_B.csv]
    let sources = SeasonSources::from_args(std::env::args_os().skip(1));
    log::info!(
        "Season files: {} and {}",
        sources.a.display(),
        sources.b.display()
    );

    let mut state = AppState::new(ChartConfig::default(), sources);
    state.initialize();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 520.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Snow Season Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(SnowViewerApp::new(state)))),
    )
}
