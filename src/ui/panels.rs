use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and the Recommend action
// ---------------------------------------------------------------------------

/// Which option list a multi-select edits.
#[derive(Clone, Copy)]
enum Facet {
    Topic,
    Make,
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Happy to recommend...");
    ui.separator();

    // Clone the option lists so we can mutate state inside the loops.
    let topics = state.table.topics.clone();
    let makes = state.table.makes.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .max_height((ui.available_height() - 48.0).max(0.0))
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, state, Facet::Topic, "Choose your \"car\"acteristics:", &topics);
            ui.separator();
            multi_select(ui, state, Facet::Make, "Narrow your car choices?", &makes);
        });

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        let button = egui::Button::new(RichText::new("Recommend").strong());
        if ui.add_enabled(!state.is_busy(), button).clicked() {
            let ctx = ui.ctx().clone();
            state.start_recommendation(move || ctx.request_repaint());
        }
        if state.is_busy() {
            ui.spinner();
        }
    });
}

/// A collapsible checkbox list. Nothing ticked means "no filter".
fn multi_select(ui: &mut Ui, state: &mut AppState, facet: Facet, label: &str, options: &BTreeSet<String>) {
    let selected = match facet {
        Facet::Topic => &state.selection.topics,
        Facet::Make => &state.selection.makes,
    };
    let header_text = if selected.is_empty() {
        format!("{label}  (any)")
    } else {
        format!("{label}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                match facet {
                    Facet::Topic => state.clear_topics(),
                    Facet::Make => state.clear_makes(),
                }
            }

            for option in options {
                let mut checked = match facet {
                    Facet::Topic => state.selection.topics.contains(option),
                    Facet::Make => state.selection.makes.contains(option),
                };
                let mut text = RichText::new(option);
                if let Facet::Topic = facet {
                    text = text.color(state.topic_colors.color_for(option));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    match facet {
                        Facet::Topic => state.toggle_topic(option),
                        Facet::Make => state.toggle_make(option),
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} reviews loaded from {}, {} candidates",
            state.table.len(),
            state.data_path.display(),
            state.candidates.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Load another review table. Failures keep the current table.
pub fn open_file_dialog(state: &mut AppState) {
    if state.is_busy() {
        state.status_message = Some("Wait for the running recommendation to finish".into());
        return;
    }

    let file = rfd::FileDialog::new()
        .set_title("Open review data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match ride_recommender::data::loader::load_file(&path) {
            Ok(table) => state.set_table(table, path),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
