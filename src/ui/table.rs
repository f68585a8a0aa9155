use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::UNKNOWN_LABEL;
use crate::data::model::{Dataset, Record};

/// Rows shown in the filtered-data preview.
pub const TABLE_PREVIEW_ROWS: usize = 100;

const HEADERS: [&str; 9] = [
    "make_year",
    "brand",
    "fuel_type",
    "transmission",
    "price_usd",
    "owner_count",
    "service_history",
    "mileage_kmpl",
    "engine_cc",
];

/// Display text for each column of a record, in [`HEADERS`] order.
fn cells(rec: &Record) -> [String; 9] {
    [
        rec.make_year.to_string(),
        rec.brand.clone(),
        rec.fuel_type.as_deref().unwrap_or(UNKNOWN_LABEL).to_string(),
        rec.transmission.clone(),
        format!("{:.2}", rec.price_usd),
        rec.owner_count.to_string(),
        rec.service_history.as_deref().unwrap_or(UNKNOWN_LABEL).to_string(),
        format!("{:.1}", rec.mileage_kmpl),
        rec.engine_cc.to_string(),
    ]
}

/// Render the first [`TABLE_PREVIEW_ROWS`] matching listings.
pub fn preview_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    let records = dataset.records();
    let shown = &indices[..indices.len().min(TABLE_PREVIEW_ROWS)];

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(70.0), HEADERS.len())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, shown.len(), |mut row| {
                let rec = &records[shown[row.index()]];
                for text in cells(rec) {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
