use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::Summary;
use crate::state::{AppState, Matches, Outcome, Session};
use crate::ui::{plot, table};

const NOTICE_COLOR: Color32 = Color32::from_rgb(230, 160, 30);

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics, charts and the data preview for the current selection.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to explore listings  (File → Open…)");
        });
        return;
    };

    ui.heading("Used Car Price Explorer");
    ui.label(
        "Use the filters on the left to explore how price varies by brand, model year, \
         mileage, fuel type, transmission, and more.",
    );
    ui.separator();

    match &session.outcome {
        Outcome::Invalid(e) => notice(ui, &format!("Invalid filter selection: {e}.")),
        Outcome::NoMatch => notice(
            ui,
            "No cars match the current filter selection. Try relaxing some filters.",
        ),
        Outcome::Ready(matches) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| report(ui, session, matches));
        }
    }
}

fn notice(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(format!("⚠ {text}")).color(NOTICE_COLOR).size(16.0));
}

fn report(ui: &mut Ui, session: &Session, matches: &Matches) {
    metrics(ui, &matches.summary);
    ui.separator();

    ui.heading("Price vs. Mileage (colored by fuel type)");
    plot::price_mileage_scatter(ui, &session.dataset, &matches.indices, &session.fuel_colors);
    ui.add_space(12.0);

    ui.heading("Average Price by Brand (Filtered)");
    plot::brand_price_bars(ui, &matches.summary.by_brand);
    ui.add_space(12.0);

    ui.heading("Average Price by Model Year (Filtered)");
    plot::year_price_line(ui, &matches.summary.by_year);
    ui.add_space(12.0);

    ui.heading(format!("Filtered Data (first {} rows)", table::TABLE_PREVIEW_ROWS));
    table::preview_table(ui, &session.dataset, &matches.indices);
}

fn metrics(ui: &mut Ui, summary: &Summary) {
    let cards = [
        ("Number of cars", group_thousands(summary.count as u64)),
        ("Average price (USD)", format_usd(summary.mean_price)),
        ("Average mileage (km per liter)", format!("{:.1}", summary.mean_mileage)),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            col.label(label);
            col.label(RichText::new(value).size(28.0).strong());
        }
    });
}

// -- Formatting helpers --

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with thousands separators, e.g. `"$15,000"`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}
