use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_SAMPLE_BUDGET, MIN_SPAN_MS};
use crate::error::{TrendError, TrendResult};

fn default_pan_step_ratio() -> f64 {
    0.3
}

fn default_zoom_in_factor() -> f64 {
    0.8
}

fn default_zoom_out_factor() -> f64 {
    1.2
}

fn default_min_span_ms() -> i64 {
    MIN_SPAN_MS
}

fn default_wheel_zoom_speed() -> f64 {
    0.1
}

fn default_wheel_pan_step_ratio() -> f64 {
    0.1
}

fn default_wheel_idle_commit_ms() -> i64 {
    500
}

fn default_drag_damping() -> f64 {
    1.0
}

fn default_sample_budget() -> usize {
    DEFAULT_SAMPLE_BUDGET
}

fn default_plot_width_px() -> f64 {
    1000.0
}

/// Tuning for `ViewportController`.
///
/// Serializable so hosts can persist/load controller setup; every field falls
/// back to its default when absent from the JSON input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportControllerConfig {
    /// Fraction of the visible span moved by one discrete pan.
    #[serde(default = "default_pan_step_ratio")]
    pub pan_step_ratio: f64,
    /// Span multiplier for one discrete zoom-in step.
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,
    /// Span multiplier for one discrete zoom-out step.
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
    #[serde(default = "default_min_span_ms")]
    pub min_span_ms: i64,
    /// Relative span change per wheel zoom notch.
    #[serde(default = "default_wheel_zoom_speed")]
    pub wheel_zoom_speed: f64,
    /// Fraction of the visible span moved per 120 horizontal wheel units.
    #[serde(default = "default_wheel_pan_step_ratio")]
    pub wheel_pan_step_ratio: f64,
    /// Quiet period after the last wheel pan before the viewport is committed.
    #[serde(default = "default_wheel_idle_commit_ms")]
    pub wheel_idle_commit_ms: i64,
    #[serde(default = "default_drag_damping")]
    pub drag_damping: f64,
    /// Per-dataset point budget before LTTB decimation kicks in.
    #[serde(default = "default_sample_budget")]
    pub sample_budget: usize,
    #[serde(default = "default_plot_width_px")]
    pub plot_width_px: f64,
}

impl Default for ViewportControllerConfig {
    fn default() -> Self {
        Self {
            pan_step_ratio: default_pan_step_ratio(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            min_span_ms: default_min_span_ms(),
            wheel_zoom_speed: default_wheel_zoom_speed(),
            wheel_pan_step_ratio: default_wheel_pan_step_ratio(),
            wheel_idle_commit_ms: default_wheel_idle_commit_ms(),
            drag_damping: default_drag_damping(),
            sample_budget: default_sample_budget(),
            plot_width_px: default_plot_width_px(),
        }
    }
}

impl ViewportControllerConfig {
    #[must_use]
    pub fn with_pan_step_ratio(mut self, ratio: f64) -> Self {
        self.pan_step_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_zoom_factors(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in_factor = zoom_in;
        self.zoom_out_factor = zoom_out;
        self
    }

    #[must_use]
    pub fn with_min_span_ms(mut self, min_span_ms: i64) -> Self {
        self.min_span_ms = min_span_ms;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_speed(mut self, speed: f64) -> Self {
        self.wheel_zoom_speed = speed;
        self
    }

    #[must_use]
    pub fn with_wheel_idle_commit_ms(mut self, idle_ms: i64) -> Self {
        self.wheel_idle_commit_ms = idle_ms;
        self
    }

    #[must_use]
    pub fn with_drag_damping(mut self, damping: f64) -> Self {
        self.drag_damping = damping;
        self
    }

    #[must_use]
    pub fn with_sample_budget(mut self, samples: usize) -> Self {
        self.sample_budget = samples;
        self
    }

    #[must_use]
    pub fn with_plot_width_px(mut self, width_px: f64) -> Self {
        self.plot_width_px = width_px;
        self
    }

    pub fn validate(self) -> TrendResult<Self> {
        if !self.pan_step_ratio.is_finite() || self.pan_step_ratio <= 0.0 {
            return Err(TrendError::InvalidConfig(
                "pan step ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.zoom_in_factor.is_finite()
            || self.zoom_in_factor <= 0.0
            || self.zoom_in_factor >= 1.0
        {
            return Err(TrendError::InvalidConfig(
                "zoom-in factor must be in (0, 1)".to_owned(),
            ));
        }
        if !self.zoom_out_factor.is_finite() || self.zoom_out_factor <= 1.0 {
            return Err(TrendError::InvalidConfig(
                "zoom-out factor must be finite and > 1".to_owned(),
            ));
        }
        if self.min_span_ms <= 0 {
            return Err(TrendError::InvalidConfig(
                "min span must be > 0".to_owned(),
            ));
        }
        if !self.wheel_zoom_speed.is_finite()
            || self.wheel_zoom_speed <= 0.0
            || self.wheel_zoom_speed >= 1.0
        {
            return Err(TrendError::InvalidConfig(
                "wheel zoom speed must be in (0, 1)".to_owned(),
            ));
        }
        if !self.wheel_pan_step_ratio.is_finite() || self.wheel_pan_step_ratio <= 0.0 {
            return Err(TrendError::InvalidConfig(
                "wheel pan step ratio must be finite and > 0".to_owned(),
            ));
        }
        if self.wheel_idle_commit_ms < 0 {
            return Err(TrendError::InvalidConfig(
                "wheel idle commit timeout must be >= 0".to_owned(),
            ));
        }
        if !self.drag_damping.is_finite() || self.drag_damping <= 0.0 {
            return Err(TrendError::InvalidConfig(
                "drag damping must be finite and > 0".to_owned(),
            ));
        }
        if self.sample_budget < 3 {
            return Err(TrendError::InvalidConfig(
                "sample budget must be >= 3".to_owned(),
            ));
        }
        if !self.plot_width_px.is_finite() || self.plot_width_px <= 0.0 {
            return Err(TrendError::InvalidConfig(
                "plot width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn to_json_pretty(self) -> TrendResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| TrendError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> TrendResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| TrendError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}
