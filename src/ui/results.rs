use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use ride_recommender::recommend::Recommendation;

use crate::state::{AppState, Notice};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – candidates and recommendations
// ---------------------------------------------------------------------------

/// Render the central panel.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.strong("Top matches for your selection");
    if state.candidates.is_empty() {
        ui.label("Nothing matches the current filters.");
    } else {
        candidate_table(ui, state);
        plot::rank_chart(ui, state);
    }
    ui.separator();

    match &state.notice {
        Some(Notice::Warning(msg)) => {
            ui.label(RichText::new(msg).color(Color32::YELLOW));
        }
        Some(Notice::Error(msg)) => {
            ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
        }
        None => {}
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for rec in &state.recommendations {
                recommendation_card(ui, rec);
            }
            if state.is_busy() {
                ui.horizontal(|ui: &mut Ui| {
                    ui.spinner();
                    ui.label("Writing recommendations…");
                });
            }
        });
}

fn candidate_table(ui: &mut Ui, state: &AppState) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto().at_least(160.0))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Vehicle");
            });
            header.col(|ui| {
                ui.strong("Topic");
            });
            header.col(|ui| {
                ui.strong("Cluster");
            });
            header.col(|ui| {
                ui.strong("Rank score");
            });
        })
        .body(|mut body| {
            for (i, c) in state.candidates.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}", i + 1));
                    });
                    row.col(|ui| {
                        ui.label(c.record.vehicle_title.as_str());
                    });
                    row.col(|ui| {
                        let color = state.topic_colors.color_for(&c.record.assigned_topic);
                        ui.label(RichText::new(&c.record.assigned_topic).color(color));
                    });
                    row.col(|ui| {
                        ui.label(c.record.cluster.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", c.rank_score));
                    });
                });
            }
        });
}

/// A titled block: vehicle and stars, the generated text, the info link.
fn recommendation_card(ui: &mut Ui, rec: &Recommendation) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(format!("{} {}", rec.title, rec.stars));
        ui.label(rec.summary.as_str());
        ui.hyperlink_to("🔗 More info", &rec.link);
    });
    ui.add_space(8.0);
}
