use serde::{Deserialize, Serialize};

use crate::error::{TrendError, TrendResult};

/// Hue step between consecutive datasets (golden-angle style spread).
const HUE_STEP_DEGREES: f64 = 137.5;
const SERIES_SATURATION: f64 = 0.8;
const SERIES_LIGHTNESS: f64 = 0.6;
const FILL_ALPHA: f64 = 0.1;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Converts HSL (hue in degrees, saturation/lightness in 0..=1).
    #[must_use]
    pub fn from_hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let hue = hue.rem_euclid(360.0) / 360.0;
        if saturation <= 0.0 {
            return Self::rgba(lightness, lightness, lightness, alpha);
        }
        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;
        Self::rgba(
            hue_to_channel(p, q, hue + 1.0 / 3.0),
            hue_to_channel(p, q, hue),
            hue_to_channel(p, q, hue - 1.0 / 3.0),
            alpha,
        )
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> TrendResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(TrendError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Stroke and fill for one dataset line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub hue_degrees: f64,
    pub stroke: Color,
    /// Area fill under the line; only set when a single dataset is shown.
    pub fill: Option<Color>,
}

impl SeriesStyle {
    #[must_use]
    pub fn for_index(index: usize, dataset_count: usize) -> Self {
        let hue_degrees = (index as f64 * HUE_STEP_DEGREES) % 360.0;
        let stroke = Color::from_hsla(hue_degrees, SERIES_SATURATION, SERIES_LIGHTNESS, 1.0);
        let fill = (dataset_count == 1).then(|| stroke.with_alpha(FILL_ALPHA));
        Self {
            hue_degrees,
            stroke,
            fill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, SeriesStyle};
    use approx::assert_relative_eq;

    #[test]
    fn hsl_primary_hues_convert() {
        let red = Color::from_hsla(0.0, 1.0, 0.5, 1.0);
        assert_relative_eq!(red.red, 1.0);
        assert_relative_eq!(red.green, 0.0);
        assert_relative_eq!(red.blue, 0.0);

        let green = Color::from_hsla(120.0, 1.0, 0.5, 1.0);
        assert_relative_eq!(green.green, 1.0);
        assert_relative_eq!(green.red, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn palette_cycles_hue_and_fills_single_dataset_only() {
        let third = SeriesStyle::for_index(3, 4);
        assert_relative_eq!(third.hue_degrees, 52.5);
        assert!(third.fill.is_none());
        assert!(third.stroke.validate().is_ok());

        let only = SeriesStyle::for_index(0, 1);
        assert!(only.fill.is_some());
    }
}
