use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently shown in the scatter chart.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(Ok(selection))) =
        (&state.dataset, state.view.as_ref().map(|v| &v.scatter))
    else {
        return;
    };
    if selection.is_empty() {
        ui.label("No launches match the current site and payload range.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(70.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in [
                "Flight",
                "Launch Site",
                "Payload (kg)",
                "Booster Version",
                "Category",
                "Outcome",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, selection.len(), |mut row| {
                let rec = &dataset.records()[selection.indices[row.index()]];
                row.col(|ui| {
                    ui.label(rec.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or("-"));
                });
                row.col(|ui| {
                    ui.label(&rec.booster_category);
                });
                row.col(|ui| {
                    ui.label(RichText::new(rec.outcome.label()).color(outcome_color(rec.outcome)));
                });
            });
        });
}
