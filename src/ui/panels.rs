use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the left input panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Records");
    ui.separator();

    let (choices, min, max) = match &state.dataset {
        Some(ds) if ds.is_empty() => {
            ui.label("The dataset has no launches.");
            return;
        }
        Some(ds) => (ds.site_choices(), ds.min_payload_kg(), ds.max_payload_kg()),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // ---- Launch site ----
    ui.strong("Choose Launch Site:");
    let current = state.inputs.selector.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for choice in &choices {
                if ui
                    .selectable_label(*choice == current, choice.to_string())
                    .clicked()
                {
                    picked = Some(choice.clone());
                }
            }
        });
    if let Some(selector) = picked {
        state.select_site(selector);
    }
    ui.add_space(8.0);

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let step = state.payload_step;
    // Slider values snap to multiples of `step`; set_payload_range clamps
    // them back into [min, max] so both dataset bounds stay reachable.
    let PayloadRange { mut low, mut high } = state.inputs.range;
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut low, min..=max).step_by(step).text("min"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut high, min..=max).step_by(step).text("max"))
        .changed();
    if changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }
    if state.inputs.range.is_empty() {
        ui.label(RichText::new("min > max: nothing selected").color(Color32::YELLOW));
    }
    if ui.small_button("Full range").clicked() {
        state.reset_payload_range();
    }
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

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            match &view.scatter {
                Ok(sel) => ui.label(format!(
                    "{} launches loaded, {} selected, {} successful",
                    ds.len(),
                    sel.len(),
                    sel.success_count(ds)
                )),
                Err(_) => ui.label(format!("{} launches loaded", ds.len())),
            };
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches with sites {:?}",
                    dataset.len(),
                    dataset.distinct_sites()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
