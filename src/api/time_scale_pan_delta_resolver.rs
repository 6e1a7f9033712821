use crate::core::Viewport;

const WHEEL_STEP_UNITS: f64 = 120.0;

fn round_to_millis(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(value.round() as i64)
}

/// Window displacement for a drag of `delta_px`.
///
/// Dragging right (positive pixels) moves the window towards older data.
pub(super) fn resolve_drag_pan_delta_ms(
    delta_px: f64,
    px_to_time_ratio: f64,
    damping: f64,
) -> Option<i64> {
    round_to_millis(-(delta_px * px_to_time_ratio * damping))
}

/// Milliseconds represented by one plot pixel for `window`.
pub(super) fn resolve_px_to_time_ratio(window: Viewport, plot_width_px: f64) -> Option<f64> {
    if !plot_width_px.is_finite() || plot_width_px <= 0.0 {
        return None;
    }
    Some(window.span() as f64 / plot_width_px)
}

pub(super) fn resolve_pixel_to_time(window: Viewport, x_px: f64, plot_width_px: f64) -> Option<i64> {
    let ratio = resolve_px_to_time_ratio(window, plot_width_px)?;
    let offset = round_to_millis(x_px.clamp(0.0, plot_width_px) * ratio)?;
    Some(window.min.saturating_add(offset))
}

/// Window displacement for a horizontal wheel delta; positive deltas move
/// towards `now()`.
pub(super) fn resolve_wheel_pan_delta_ms(
    wheel_delta_x: f64,
    visible_span_ms: i64,
    pan_step_ratio: f64,
) -> Option<i64> {
    if wheel_delta_x == 0.0 {
        return None;
    }
    let normalized_steps = wheel_delta_x / WHEEL_STEP_UNITS;
    round_to_millis(normalized_steps * visible_span_ms as f64 * pan_step_ratio)
}

/// Span multiplier for a vertical wheel delta: scrolling up zooms in.
pub(super) fn resolve_wheel_zoom_factor(wheel_delta_y: f64, zoom_speed: f64) -> Option<f64> {
    if !wheel_delta_y.is_finite() || wheel_delta_y == 0.0 {
        return None;
    }
    Some(if wheel_delta_y < 0.0 {
        1.0 - zoom_speed
    } else {
        1.0 + zoom_speed
    })
}
