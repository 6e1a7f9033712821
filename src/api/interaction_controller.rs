use tracing::trace;

use crate::core::time_scale::shift_window;
use crate::interaction::{GestureEvent, GestureOutcome};

use super::time_scale_pan_delta_resolver::{
    resolve_pixel_to_time, resolve_px_to_time_ratio, resolve_wheel_pan_delta_ms,
    resolve_wheel_zoom_factor,
};
use super::{Clock, ViewStateStore, ViewportController};

impl<S: ViewStateStore, C: Clock> ViewportController<S, C> {
    /// Dispatches one input event in delivery order.
    pub fn handle_event(&mut self, event: GestureEvent) -> GestureOutcome {
        match event {
            GestureEvent::PointerDown { x } => self.pointer_down(x),
            GestureEvent::PointerMove { x } => self.pointer_move(x),
            GestureEvent::PointerUp | GestureEvent::PointerLeave => self.pointer_release(),
            GestureEvent::Wheel {
                delta_x,
                delta_y,
                anchor_x,
            } => self.wheel(delta_x, delta_y, anchor_x),
        }
    }

    /// Starts a drag. A pending wheel pan is committed first.
    pub fn pointer_down(&mut self, x: f64) -> GestureOutcome {
        let committed = self.interaction.wheel_pan_pending_since().is_some() && self.commit();
        if x.is_finite() {
            self.interaction.on_drag_start(x);
        }
        GestureOutcome {
            committed,
            ..GestureOutcome::default()
        }
    }

    /// Pans the live viewport by the pointer displacement while dragging.
    pub fn pointer_move(&mut self, x: f64) -> GestureOutcome {
        if !x.is_finite() {
            return GestureOutcome::default();
        }
        let Some(delta_px) = self.interaction.on_drag_move(x) else {
            return GestureOutcome::default();
        };
        let Some(ratio) = resolve_px_to_time_ratio(self.live, self.config.plot_width_px) else {
            return GestureOutcome::default();
        };
        let mut outcome = self.pan_by_delta(delta_px, ratio, self.config.drag_damping);
        outcome.prevent_default = true;
        outcome
    }

    /// Ends a drag on pointer up or leave and commits the dragged viewport.
    pub fn pointer_release(&mut self) -> GestureOutcome {
        if !self.interaction.on_drag_end() {
            return GestureOutcome::default();
        }
        trace!("drag ended");
        GestureOutcome {
            committed: self.on_pan_complete(),
            ..GestureOutcome::default()
        }
    }

    /// Handles a wheel event.
    ///
    /// A dominant horizontal delta pans the live viewport and defers the commit
    /// until the wheel has been idle (see `poll_idle`). A vertical delta zooms
    /// around the pointer and commits immediately when accepted. Any handled
    /// wheel event asks the host to suppress the platform's default scrolling.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64, anchor_x: f64) -> GestureOutcome {
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return GestureOutcome::default();
        }

        if delta_x.abs() > delta_y.abs() {
            let Some(delta_ms) = resolve_wheel_pan_delta_ms(
                delta_x,
                self.live.span(),
                self.config.wheel_pan_step_ratio,
            ) else {
                return GestureOutcome::default();
            };
            let mut outcome = self.apply_live(shift_window(self.live, delta_ms));
            self.interaction.on_wheel_pan(self.clock.now_ms());
            outcome.prevent_default = true;
            return outcome;
        }

        let Some(factor) = resolve_wheel_zoom_factor(delta_y, self.config.wheel_zoom_speed) else {
            return GestureOutcome::default();
        };
        let anchor_ms = resolve_pixel_to_time(self.live, anchor_x, self.config.plot_width_px)
            .unwrap_or_else(|| self.live.center());

        let before = self.live;
        let before_unit = self.unit;
        if !self.zoom_at_pointer(factor, anchor_ms) {
            return GestureOutcome {
                prevent_default: true,
                ..GestureOutcome::default()
            };
        }
        GestureOutcome {
            visible_changed: self.live != before,
            committed: self.on_zoom_complete(),
            unit_changed: self.unit != before_unit,
            prevent_default: true,
        }
    }

    /// Commits a wheel pan once no wheel event arrived for the configured
    /// idle timeout. Hosts call this from their timer or frame loop.
    pub fn poll_idle(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        if self
            .interaction
            .take_idle_wheel_pan(now_ms, self.config.wheel_idle_commit_ms)
        {
            return self.commit();
        }
        false
    }
}
