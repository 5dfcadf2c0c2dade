use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};

use ride_recommender::config::Config;
use ride_recommender::data::loader;
use ride_recommender::recommend::Recommender;
use ride_recommender::recommend::generator::OpenAiGenerator;

use crate::state::AppState;
use crate::ui::{panels, results};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub enum RideRecommenderApp {
    Ready(AppState),
    /// A fatal startup error. Only the message is shown, no controls.
    Failed(String),
}

impl RideRecommenderApp {
    /// Load the data, check the credential, build the generation client.
    pub fn start(config: &Config) -> Self {
        match Self::startup(config) {
            Ok(state) => RideRecommenderApp::Ready(state),
            Err(msg) => {
                log::error!("{msg}");
                RideRecommenderApp::Failed(msg)
            }
        }
    }

    fn startup(config: &Config) -> Result<AppState, String> {
        let table = loader::load_file(&config.data).map_err(|e| format!("{e:#}"))?;
        let api_key = config.require_api_key()?;
        let generator = OpenAiGenerator::new(&config.base_url, api_key).map_err(|e| e.to_string())?;
        let recommender = Recommender::new(Arc::new(generator), config.generation_settings());
        Ok(AppState::new(table, config.data.clone(), recommender))
    }
}

impl eframe::App for RideRecommenderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            RideRecommenderApp::Ready(state) => state,
            RideRecommenderApp::Failed(msg) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(msg.as_str()).color(Color32::RED).heading());
                    });
                });
                return;
            }
        };

        state.poll_worker();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: candidates and recommendations ----
        egui::CentralPanel::default().show(ctx, |ui| {
            results::central_panel(ui, state);
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    const CSV: &str = "make,model,assigned_topic,make_cluster_perc,assigned_topic_cluster_perc,\
sentiment,sentiment_score,cluster,vehicle_title,review,text_for_clustering,strengths,weaknesses,rating\n\
Toyota,Camry,comfort,0.8,0.5,positive,0.9,3,2024 Toyota Camry,Quiet,smooth,space,noise,4.5\n";

    fn config(data: &Path, api_key: Option<&str>) -> Config {
        let mut config =
            Config::try_parse_from([Path::new("ride-recommender"), Path::new("--data"), data])
                .unwrap();
        // Ignore whatever credential the test environment carries.
        config.api_key = api_key.map(str::to_string);
        config
    }

    fn failure(app: RideRecommenderApp) -> String {
        match app {
            RideRecommenderApp::Failed(msg) => msg,
            RideRecommenderApp::Ready(_) => panic!("expected a startup failure"),
        }
    }

    #[test]
    fn missing_data_file_fails_startup() {
        let dir = TempDir::new().unwrap();
        let app = RideRecommenderApp::start(&config(&dir.path().join("none.csv"), Some("sk-test")));
        assert!(failure(app).starts_with("Data file not found"));
    }

    #[test]
    fn missing_credential_fails_startup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, CSV).unwrap();
        let app = RideRecommenderApp::start(&config(&path, None));
        assert_eq!(failure(app), "Set OPENAI_API_KEY environment variable");
    }

    #[test]
    fn missing_columns_fail_before_the_credential_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thin.csv");
        std::fs::write(&path, "make,model\nKia,Rio\n").unwrap();
        let app = RideRecommenderApp::start(&config(&path, None));
        assert!(failure(app).starts_with("Missing columns: assigned_topic"));
    }

    #[test]
    fn valid_data_and_credential_start_ready() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reviews.csv");
        std::fs::write(&path, CSV).unwrap();
        match RideRecommenderApp::start(&config(&path, Some("sk-test"))) {
            RideRecommenderApp::Ready(state) => {
                assert_eq!(state.table.len(), 1);
                assert_eq!(state.candidates.len(), 1);
                assert_eq!(state.data_path, path);
            }
            RideRecommenderApp::Failed(msg) => panic!("startup failed: {msg}"),
        }
    }
}
