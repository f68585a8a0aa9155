use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Legend label for listings whose category is null.
pub const UNKNOWN_LABEL: &str = "Unknown";

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the observed values of a categorical column to distinct colours.
/// Null values share a neutral grey.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the observed (non-null) categories.
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a (possibly null) category.
    pub fn color_for(&self, category: Option<&str>) -> Color32 {
        category
            .and_then(|c| self.mapping.get(c))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend label for a (possibly null) category.
    pub fn label_for(category: Option<&str>) -> &str {
        category.unwrap_or(UNKNOWN_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn null_and_unknown_categories_fall_back_to_grey() {
        let cats: BTreeSet<String> = ["Diesel", "Petrol"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&cats);

        assert_ne!(map.color_for(Some("Diesel")), map.color_for(Some("Petrol")));
        assert_eq!(map.color_for(None), Color32::GRAY);
        assert_eq!(map.color_for(Some("Hydrogen")), Color32::GRAY);
        assert_eq!(ColorMap::label_for(None), UNKNOWN_LABEL);
    }
}
