use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::BandStyle;
use crate::data::model::SubjectRegistry;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.70, 0.45).into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

/// Fill colour of the annotation bands, opacity applied.
pub fn band_fill(style: &BandStyle) -> Color32 {
    let [r, g, b] = style.fill;
    let alpha = (style.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

// ---------------------------------------------------------------------------
// Subject → colour
// ---------------------------------------------------------------------------

/// Stable subject colours: hues are spread over the sorted registry, so a
/// subject keeps its colour whatever else is selected.
#[derive(Debug, Clone)]
pub struct SubjectColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl SubjectColors {
    pub fn new(registry: &SubjectRegistry) -> Self {
        let palette = generate_palette(registry.len());
        let mapping = registry.sorted().cloned().zip(palette).collect();
        SubjectColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a subject.
    pub fn color_for(&self, subject: &str) -> Color32 {
        self.mapping
            .get(subject)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colours() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(6);
        assert_eq!(colours.len(), 6);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn colours_are_stable_and_unknown_is_grey() {
        let colors = SubjectColors::new(&SubjectRegistry::new(["B", "A"]));
        assert_eq!(colors.color_for("A"), generate_palette(2)[0]);
        assert_eq!(colors.color_for("B"), generate_palette(2)[1]);
        assert_eq!(colors.color_for("Z"), Color32::GRAY);
    }

    #[test]
    fn band_fill_applies_opacity() {
        let fill = band_fill(&BandStyle::default());
        assert_eq!(fill.a(), 128);
    }
}
