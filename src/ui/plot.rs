use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rank-score chart (central panel)
// ---------------------------------------------------------------------------

/// Bar per current candidate, coloured by its topic.
pub fn rank_chart(ui: &mut Ui, state: &AppState) {
    let bars: Vec<Bar> = state
        .candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new((i + 1) as f64, c.rank_score)
                .name(&c.record.vehicle_title)
                .fill(state.topic_colors.color_for(&c.record.assigned_topic))
                .width(0.6)
        })
        .collect();

    let chart = BarChart::new(bars).name("rank score");

    Plot::new("rank_chart")
        .legend(Legend::default())
        .height(160.0)
        .x_axis_label("Rank")
        .y_axis_label("Score")
        .include_y(0.0)
        .include_y(1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
