use crate::core::{EPOCH_FLOOR_MS, Viewport};

/// Moves `window` inside `[EPOCH_FLOOR_MS, now_ms]`.
///
/// The window is shifted rather than shrunk: when it crosses `now_ms` its
/// right edge saturates there and the span is kept, and symmetrically at the
/// floor. Only a span wider than the whole domain gets reduced. Reversed or
/// empty input is normalized to a non-empty window first.
#[must_use]
pub fn clamp_window(window: Viewport, now_ms: i64) -> Viewport {
    let ceiling = now_ms.max(EPOCH_FLOOR_MS + 1);
    let available = ceiling - EPOCH_FLOOR_MS;

    let low = window.min.min(window.max);
    let high = window.min.max(window.max);
    let span = high.saturating_sub(low).clamp(1, available);

    let mut min = low;
    let mut max = low.saturating_add(span);
    if max > ceiling {
        max = ceiling;
        min = max - span;
    }
    if min < EPOCH_FLOOR_MS {
        min = EPOCH_FLOOR_MS;
        max = min + span;
    }

    Viewport::new(min, max)
}

/// Clamps a span into `[min_span, max_span]`.
///
/// A `max_span` below `min_span` collapses the range onto `min_span`.
#[must_use]
pub fn clamp_span(span: i64, min_span: i64, max_span: i64) -> i64 {
    span.clamp(min_span, max_span.max(min_span))
}

/// Scales a span by a finite positive factor, rounding to whole milliseconds.
#[must_use]
pub fn scale_span(span: i64, factor: f64) -> i64 {
    let scaled = (span as f64 * factor).round();
    if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= 1.0 {
        1
    } else {
        scaled as i64
    }
}

/// Builds a window of `span` centered on `center`.
#[must_use]
pub fn window_around_center(center: i64, span: i64) -> Viewport {
    let min = center.saturating_sub(span / 2);
    Viewport::new(min, min.saturating_add(span))
}

/// Builds a window of `span` that keeps `anchor` at the same relative
/// position it had inside `current`.
///
/// Anchors outside `current` are pulled onto its nearest edge.
#[must_use]
pub fn window_around_anchor(current: Viewport, anchor: i64, span: i64) -> Viewport {
    let low = current.min.min(current.max);
    let high = current.min.max(current.max);
    let anchor = anchor.clamp(low, high);
    let current_span = current.span().max(1) as f64;
    let ratio = (anchor.saturating_sub(low) as f64 / current_span).clamp(0.0, 1.0);
    let left = (ratio * span as f64).round() as i64;
    let min = anchor.saturating_sub(left);
    Viewport::new(min, min.saturating_add(span))
}

/// Shifts a window by a signed delta in milliseconds.
#[must_use]
pub fn shift_window(window: Viewport, delta_ms: i64) -> Viewport {
    Viewport::new(
        window.min.saturating_add(delta_ms),
        window.max.saturating_add(delta_ms),
    )
}
