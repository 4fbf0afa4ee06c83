use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Season;

// ---------------------------------------------------------------------------
// Season palette
// ---------------------------------------------------------------------------

/// Hue offset so the first season lands on blue rather than red.
const BASE_HUE: f32 = 210.0;

/// `n` distinct colours with evenly spaced hues starting at [`BASE_HUE`].
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + i as f32 / n as f32 * 360.0) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.7, 0.5).into_color();
            let [r, g, b] = [rgb.red, rgb.green, rgb.blue].map(|c| (c * 255.0).round() as u8);
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

/// Line and legend colour per season.
#[derive(Debug, Clone)]
pub struct SeasonColors {
    colors: [Color32; 2],
}

impl Default for SeasonColors {
    fn default() -> Self {
        let palette = generate_palette(Season::ALL.len());
        Self {
            colors: [palette[0], palette[1]],
        }
    }
}

impl SeasonColors {
    pub fn color_for(&self, season: Season) -> Color32 {
        self.colors[season.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_len_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn test_season_colors_differ() {
        let colors = SeasonColors::default();
        assert_ne!(colors.color_for(Season::A), colors.color_for(Season::B));
    }

    #[test]
    fn test_first_season_is_blue() {
        let c = generate_palette(1)[0];
        assert!(c.b() > c.r() && c.b() > c.g());
    }
}
