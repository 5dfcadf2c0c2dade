mod app;
mod color;
mod state;
mod ui;

use app::RideRecommenderApp;
use clap::Parser;
use eframe::egui;
use ride_recommender::config::Config;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let app = RideRecommenderApp::start(&config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Happy to recommend...",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
