use std::collections::BTreeSet;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::criteria::{CriteriaDraft, Restriction};
use crate::state::{AppState, MultiSelect, Outcome, Session};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(session) = state.session.as_mut() else {
        ui.label("No dataset loaded.");
        return;
    };

    // Hold our own handle so the session can be mutated inside the widgets.
    let dataset = Arc::clone(&session.dataset);
    let profile = dataset.profile();
    let (price_floor, price_ceil) = CriteriaDraft::price_bounds(profile);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Model year ----
            ui.strong("Model year range");
            let d = &mut session.draft;
            let year_span = profile.year_min..=profile.year_max;
            let from = ui.add(Slider::new(&mut d.year_min, year_span.clone()).text("from"));
            let to = ui.add(Slider::new(&mut d.year_max, year_span).text("to"));
            keep_ordered(&mut d.year_min, &mut d.year_max, from.changed(), to.changed());
            ui.separator();

            // ---- Brand ----
            multi_select(ui, session, MultiSelect::Brand, "Brand", &profile.brands);
            ui.separator();

            // ---- Fuel type ----
            ui.strong("Fuel type");
            single_select(ui, "fuel_type", &mut session.draft.fuel_type, &profile.fuel_types);
            ui.separator();

            // ---- Transmission ----
            multi_select(
                ui,
                session,
                MultiSelect::Transmission,
                "Transmission",
                &profile.transmissions,
            );
            ui.separator();

            // ---- Price ----
            ui.strong("Price range (USD)");
            let d = &mut session.draft;
            let price_span = price_floor..=price_ceil;
            let from = ui.add(
                Slider::new(&mut d.price_min, price_span.clone())
                    .text("from")
                    .prefix("$"),
            );
            let to = ui.add(Slider::new(&mut d.price_max, price_span).text("to").prefix("$"));
            keep_ordered(&mut d.price_min, &mut d.price_max, from.changed(), to.changed());
            ui.separator();

            // ---- Owners ----
            ui.strong("Maximum number of previous owners");
            ui.add(Slider::new(
                &mut session.draft.max_owners,
                1..=profile.owner_max.max(1),
            ));
            ui.separator();

            // ---- Service history ----
            ui.strong("Service history");
            single_select(
                ui,
                "service_history",
                &mut session.draft.service_history,
                &profile.service_histories,
            );
            ui.separator();

            if ui.button("Reset filters").clicked() {
                session.reset_filters();
            }
        });

    // Recompute after any widget changes.
    session.refilter();
}

/// Drag the partner bound along when one end of a range passes the other.
fn keep_ordered<T: PartialOrd + Copy>(
    lower: &mut T,
    upper: &mut T,
    lower_moved: bool,
    upper_moved: bool,
) {
    if *lower <= *upper {
        return;
    }
    if lower_moved {
        *upper = *lower;
    } else if upper_moved {
        *lower = *upper;
    }
}

/// Collapsible checkbox list with All / None buttons.
fn multi_select(
    ui: &mut Ui,
    session: &mut Session,
    field: MultiSelect,
    title: &str,
    options: &BTreeSet<String>,
) {
    // Show count of selected / total in the header
    let n_selected = session.selection(field).len();
    let n_total = options.len();
    let header_text = format!("{title}  ({n_selected}/{n_total})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    session.select_all(field);
                }
                if ui.small_button("None").clicked() {
                    session.select_none(field);
                }
            });

            for value in options {
                let mut checked = session.selection(field).contains(value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    session.toggle(field, value);
                }
            }
        });
}

/// Drop-down with an "All" entry followed by the observed categories.
fn single_select(ui: &mut Ui, id: &str, current: &mut Restriction, options: &BTreeSet<String>) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(current, Restriction::Any, "All");
            for value in options {
                ui.selectable_value(current, Restriction::Only(value.clone()), value.as_str());
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

        if let Some(session) = &state.session {
            let matching = match &session.outcome {
                Outcome::Ready(m) => m.indices.len(),
                Outcome::NoMatch | Outcome::Invalid(_) => 0,
            };
            ui.label(format!(
                "{} listings loaded, {} matching",
                session.dataset.len(),
                matching
            ));
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
        .set_title("Open used-car listings")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq", "xlsx", "xls"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
