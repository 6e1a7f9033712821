use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::time_scale::{
    clamp_span, scale_span, shift_window, window_around_anchor, window_around_center,
};
use crate::core::{Viewport, clamp_window, derive_unit};
use crate::interaction::GestureOutcome;

use super::time_scale_pan_delta_resolver::resolve_drag_pan_delta_ms;
use super::{Clock, LookbackWindow, ViewStateStore, ViewportController, persistence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanDirection {
    /// Towards older data.
    Left,
    /// Towards `now()`.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl<S: ViewStateStore, C: Clock> ViewportController<S, C> {
    /// Shifts the window by the configured fraction of its span and commits.
    pub fn pan(&mut self, direction: PanDirection) -> GestureOutcome {
        let step = scale_span(self.live.span(), self.config.pan_step_ratio);
        let delta = match direction {
            PanDirection::Left => -step,
            PanDirection::Right => step,
        };
        let mut outcome = self.apply_live(shift_window(self.live, delta));
        outcome.committed = self.commit();
        outcome
    }

    /// Continuous drag pan.
    ///
    /// Moves the window by `-(delta_px * px_to_time_ratio * damping)`
    /// milliseconds: the pointer displacement is negated, so dragging right
    /// (positive `delta_px`) reveals older data. Callers holding a raw time
    /// shift must pass it with the opposite sign. Only the live viewport
    /// changes; the drag end commits.
    pub fn pan_by_delta(
        &mut self,
        delta_px: f64,
        px_to_time_ratio: f64,
        damping: f64,
    ) -> GestureOutcome {
        match resolve_drag_pan_delta_ms(delta_px, px_to_time_ratio, damping) {
            Some(delta) if delta != 0 => self.apply_live(shift_window(self.live, delta)),
            _ => GestureOutcome::default(),
        }
    }

    /// Zooms around the window centre by the configured step and commits.
    ///
    /// The resulting span is kept within `[min_span, bounds span]`; date
    /// clamps shift the window instead of shrinking it.
    pub fn zoom(&mut self, direction: ZoomDirection) -> GestureOutcome {
        let factor = match direction {
            ZoomDirection::In => self.config.zoom_in_factor,
            ZoomDirection::Out => self.config.zoom_out_factor,
        };
        self.zoom_by_factor(factor)
    }

    /// Discrete zoom with an explicit span multiplier (`< 1` zooms in).
    ///
    /// Non-finite or non-positive factors leave the state untouched.
    pub fn zoom_by_factor(&mut self, factor: f64) -> GestureOutcome {
        if !factor.is_finite() || factor <= 0.0 {
            return GestureOutcome::default();
        }
        let span = clamp_span(
            scale_span(self.live.span(), factor),
            self.config.min_span_ms,
            self.max_span(),
        );
        let mut outcome = self.apply_live(window_around_center(self.live.center(), span));
        outcome.committed = self.commit();
        outcome
    }

    /// Pointer/wheel zoom keeping `anchor_ms` at the same relative position.
    ///
    /// Returns `false` and leaves state untouched when the requested span would
    /// fall below the minimum span. Zooming out saturates at the bounds span.
    /// Only the live viewport changes; call `on_zoom_complete` to commit.
    pub fn zoom_at_pointer(&mut self, factor: f64, anchor_ms: i64) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let requested = scale_span(self.live.span(), factor);
        if requested < self.config.min_span_ms {
            trace!(requested, "rejecting zoom below minimum span");
            return false;
        }
        let span = requested.min(self.max_span());
        self.apply_live(window_around_anchor(self.live, anchor_ms, span));
        true
    }

    /// Veto hook for the rendering collaborator's in-flight zoom.
    #[must_use]
    pub fn on_zoom_during(&self, proposed: Viewport) -> bool {
        proposed.is_valid() && proposed.span() >= self.config.min_span_ms
    }

    /// Gesture-complete hook; commits the live viewport.
    pub fn on_zoom_complete(&mut self) -> bool {
        self.commit()
    }

    /// Pan-complete hook; commits the live viewport.
    pub fn on_pan_complete(&mut self) -> bool {
        self.commit()
    }

    /// Restores the full bounds window and commits.
    pub fn reset(&mut self) -> GestureOutcome {
        let mut outcome = self.apply_live(self.bounds_source);
        outcome.committed = self.commit();
        outcome
    }

    /// Replaces the bounds window and unconditionally shows it, overriding any
    /// restored or gesture-driven viewport.
    pub fn set_bounds_source(&mut self, bounds_source: Viewport) -> GestureOutcome {
        self.bounds_source = clamp_window(bounds_source, self.clock.now_ms());
        self.interaction.reset();
        debug!(
            min = self.bounds_source.min,
            max = self.bounds_source.max,
            "bounds source replaced"
        );
        self.reset()
    }

    /// Switches to a new lookback window, persisting the choice.
    pub fn set_lookback(&mut self, lookback: LookbackWindow) -> GestureOutcome {
        if let Err(err) = persistence::save_lookback_days(&mut self.store, lookback.days()) {
            warn!(error = %err, "failed to persist lookback window");
        }
        let bounds = lookback.bounds(self.clock.now_ms());
        self.set_bounds_source(bounds)
    }

    pub(super) fn max_span(&self) -> i64 {
        self.bounds_source.span().max(self.config.min_span_ms)
    }

    /// Clamps `window` against the current time and makes it the live viewport.
    pub(super) fn apply_live(&mut self, window: Viewport) -> GestureOutcome {
        let next = clamp_window(window, self.clock.now_ms());
        let visible_changed = next != self.live;
        self.live = next;

        let unit = derive_unit(next.span());
        let unit_changed = unit != self.unit;
        self.unit = unit;

        if visible_changed {
            trace!(min = next.min, max = next.max, ?unit, "live viewport updated");
        }
        GestureOutcome {
            visible_changed,
            committed: false,
            unit_changed,
            prevent_default: false,
        }
    }

    /// Synchronizes the committed viewport with the live one and persists it.
    ///
    /// Returns `true` when the committed viewport changed.
    pub(super) fn commit(&mut self) -> bool {
        self.interaction.clear_wheel_pan();
        if self.committed == self.live {
            return false;
        }
        self.committed = self.live;
        debug!(
            min = self.committed.min,
            max = self.committed.max,
            unit = ?self.unit,
            "viewport committed"
        );
        if let Err(err) = persistence::save_viewport(&mut self.store, self.committed) {
            warn!(error = %err, "failed to persist viewport");
        }
        true
    }
}
