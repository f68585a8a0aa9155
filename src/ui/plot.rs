use std::collections::BTreeMap;
use std::sync::Arc;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::aggregate::GroupMean;
use crate::data::model::{Dataset, Record};

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

// ---------------------------------------------------------------------------
// Price vs. mileage scatter
// ---------------------------------------------------------------------------

/// Scatter of price against mileage, one coloured series per fuel type.
/// Hovering a point shows the listing's brand, year, engine size and owners.
pub fn price_mileage_scatter(
    ui: &mut Ui,
    dataset: &Arc<Dataset>,
    indices: &[usize],
    colors: &ColorMap,
) {
    // Group points by fuel type so each one gets its own legend entry.
    let records = dataset.records();
    let mut by_fuel: BTreeMap<Option<&str>, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in indices {
        let rec = &records[idx];
        by_fuel
            .entry(rec.fuel_type.as_deref())
            .or_default()
            .push([rec.mileage_kmpl, rec.price_usd]);
    }

    let hover_dataset = Arc::clone(dataset);
    let hover_indices = indices.to_vec();

    Plot::new("price_vs_mileage")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Mileage (km per liter)")
        .y_axis_label("Price (USD)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(move |series, point| {
            match nearest_listing(&hover_dataset, &hover_indices, series, point) {
                Some(idx) => hover_text(&hover_dataset.records()[idx]),
                None => format!("{:.1} km/l\n${:.0}", point.x, point.y),
            }
        })
        .show(ui, |plot_ui| {
            for (fuel, pts) in &by_fuel {
                let points: PlotPoints = pts.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .radius(3.0)
                        .color(colors.color_for(*fuel).gamma_multiply(0.7))
                        .name(ColorMap::label_for(*fuel)),
                );
            }
        });
}

/// The listing drawn closest to `point` in the series named `series`.
/// `None` when the cursor is not over a series.
fn nearest_listing(
    dataset: &Dataset,
    indices: &[usize],
    series: &str,
    point: &PlotPoint,
) -> Option<usize> {
    if series.is_empty() {
        return None;
    }
    let records = dataset.records();
    indices
        .iter()
        .copied()
        .filter(|&idx| ColorMap::label_for(records[idx].fuel_type.as_deref()) == series)
        .min_by(|&a, &b| {
            let dist = |idx: usize| {
                let rec = &records[idx];
                (rec.mileage_kmpl - point.x).powi(2) + (rec.price_usd - point.y).powi(2)
            };
            dist(a).total_cmp(&dist(b))
        })
}

fn hover_text(rec: &Record) -> String {
    format!(
        "{} ({})\nEngine: {} cc\nOwners: {}\n{:.1} km/l, ${:.0}",
        rec.brand, rec.make_year, rec.engine_cc, rec.owner_count, rec.mileage_kmpl, rec.price_usd
    )
}

// ---------------------------------------------------------------------------
// Average price by brand
// ---------------------------------------------------------------------------

/// Bar chart of the per-brand mean prices, in the given (ranked) order.
pub fn brand_price_bars(ui: &mut Ui, by_brand: &[GroupMean<String>]) {
    let labels: Vec<String> = by_brand.iter().map(|g| g.key.clone()).collect();
    let bars: Vec<Bar> = by_brand
        .iter()
        .enumerate()
        .map(|(i, g)| Bar::new(i as f64, g.mean_price).name(&g.key).width(0.7))
        .collect();

    Plot::new("avg_price_by_brand")
        .height(CHART_HEIGHT)
        .x_axis_label("Brand")
        .y_axis_label("Average price (USD)")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (idx - mark.value).abs() > f64::EPSILON {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Average price"));
        });
}

// ---------------------------------------------------------------------------
// Average price by model year
// ---------------------------------------------------------------------------

/// Line chart of the per-year mean prices.
pub fn year_price_line(ui: &mut Ui, by_year: &[GroupMean<i32>]) {
    let series: Vec<[f64; 2]> = by_year
        .iter()
        .map(|g| [f64::from(g.key), g.mean_price])
        .collect();

    Plot::new("avg_price_by_year")
        .height(CHART_HEIGHT)
        .x_axis_label("Model year")
        .y_axis_label("Average price (USD)")
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            let line: PlotPoints = series.iter().copied().collect();
            plot_ui.line(Line::new(line).color(BAR_COLOR).width(2.0).name("Average price"));

            let markers: PlotPoints = series.iter().copied().collect();
            plot_ui.points(Points::new(markers).radius(3.5).color(BAR_COLOR));
        });
}
