use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::color::outcome_color;
use crate::data::model::Outcome;
use crate::data::summary::SiteSuccessSummary;
use crate::state::AppState;

/// Vertices per full turn of the pie outline.
const PIE_RESOLUTION: usize = 180;

// ---------------------------------------------------------------------------
// Success pie (upper central panel)
// ---------------------------------------------------------------------------

/// Outline of a unit-radius wedge from angle `start` through `sweep`
/// radians (negative sweeps go clockwise), beginning at the centre.
pub fn wedge_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep.abs() / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + sweep * i as f64 / steps as f64;
        pts.push([a.cos(), a.sin()]);
    }
    pts
}

/// Split a wedge into quarter turns at most, since polygon fills must be
/// convex. Returns `(start, sweep)` pairs covering the same arc.
pub fn convex_pieces(start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let n = (sweep.abs() / (TAU / 4.0)).ceil().max(1.0) as usize;
    let part = sweep / n as f64;
    (0..n).map(|i| (start + part * i as f64, part)).collect()
}

/// Render the success pie for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let summary = match state.view.as_ref().map(|v| &v.summary) {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view launches  (File → Open…)");
            });
            return;
        }
        Some(Err(e)) => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(format!("No chart: {e}"));
            });
            return;
        }
        Some(Ok(summary)) => summary,
    };

    ui.strong(summary.title());
    if summary.is_empty() {
        ui.label("No launches to show.");
        return;
    }

    let colors: Vec<Color32> = match summary {
        SiteSuccessSummary::BySite(sites) => sites
            .iter()
            .map(|s| state.site_colors.color_for(&s.site))
            .collect(),
        SiteSuccessSummary::ByOutcome { counts, .. } => {
            counts.iter().map(|c| outcome_color(c.outcome)).collect()
        }
    };

    Plot::new("success_pie")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            // Clockwise from 12 o'clock, like the usual pie layout.
            let mut start = TAU / 4.0;
            for (slice, color) in summary.slices().into_iter().zip(colors) {
                let sweep = -slice.fraction * TAU;
                let name = format!(
                    "{} ({}, {:.1}%)",
                    slice.label,
                    slice.count,
                    slice.fraction * 100.0
                );
                for (piece_start, piece_sweep) in convex_pieces(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge_points(piece_start, piece_sweep)))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }
                start += sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter (lower central panel)
// ---------------------------------------------------------------------------

/// Render the payload scatter, one series per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let (dataset, selection) = match (&state.dataset, state.view.as_ref().map(|v| &v.scatter)) {
        (Some(ds), Some(Ok(sel))) => (ds, sel),
        (Some(_), Some(Err(e))) => {
            ui.label(format!("No chart: {e}"));
            return;
        }
        _ => return,
    };

    ui.strong(&selection.title);

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(dataset.min_payload_kg())
        .include_x(dataset.max_payload_kg())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            let outcome = if value.y >= 0.5 {
                Outcome::Success
            } else {
                Outcome::Failure
            };
            if name.is_empty() {
                format!("{:.0} kg", value.x)
            } else {
                format!("{name}\n{:.0} kg, {outcome}", value.x)
            }
        })
        .show(ui, |plot_ui| {
            for category in dataset.booster_categories() {
                let points: Vec<[f64; 2]> = selection
                    .rows(dataset)
                    .filter(|r| &r.booster_category == category)
                    .map(|r| [r.payload_mass_kg, r.outcome.class() as f64])
                    .collect();
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
