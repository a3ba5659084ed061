use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::derive::{ScaleKind, ValueRange};

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for model lines in the time and distribution charts.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Choropleth colour scale: value → Color32
// ---------------------------------------------------------------------------

const SEQUENTIAL_HUE: f32 = 210.0;
const NEGATIVE_HUE: f32 = 220.0;
const POSITIVE_HUE: f32 = 5.0;

/// Maps choropleth values onto a sequential or diverging ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub kind: ScaleKind,
    pub range: ValueRange,
    missing_color: Color32,
}

impl ColorScale {
    pub fn new(kind: ScaleKind, range: ValueRange) -> Self {
        ColorScale {
            kind,
            range,
            missing_color: Color32::GRAY,
        }
    }

    /// Colour of a map cell. Missing values are grey.
    pub fn color_for(&self, value: Option<f64>) -> Color32 {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return self.missing_color;
        };
        match self.kind {
            ScaleKind::Sequential => {
                let span = self.range.span();
                let t = if span > 0.0 {
                    ((value - self.range.min) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                hsl_to_color32(SEQUENTIAL_HUE, 0.7, 0.9 - 0.6 * t as f32)
            }
            ScaleKind::Diverging => {
                // Symmetric around zero; white marks the baseline.
                let extent = self.range.min.abs().max(self.range.max.abs());
                let t = if extent > 0.0 {
                    (value / extent).clamp(-1.0, 1.0)
                } else {
                    0.0
                };
                let hue = if t < 0.0 { NEGATIVE_HUE } else { POSITIVE_HUE };
                hsl_to_color32(hue, 0.75, 0.95 - 0.5 * t.abs() as f32)
            }
        }
    }

    /// `steps` evenly spaced legend ticks (label → colour), low to high.
    pub fn legend_entries(&self, steps: usize) -> Vec<(String, Color32)> {
        let steps = steps.max(2);
        (0..steps)
            .map(|i| {
                let v = self.range.min + self.range.span() * i as f64 / (steps - 1) as f64;
                (self.kind.legend_label(v), self.color_for(Some(v)))
            })
            .collect()
    }
}
