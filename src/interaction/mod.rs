use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Raw input delivered by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    /// Pointer left the interactive surface; ends a drag like `PointerUp`.
    PointerLeave,
    /// Wheel deltas in platform units; `anchor_x` is the pointer position in
    /// plot pixels.
    Wheel {
        delta_x: f64,
        delta_y: f64,
        anchor_x: f64,
    },
}

/// What a single event did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureOutcome {
    /// The live (rendered) viewport moved.
    pub visible_changed: bool,
    /// The committed viewport was synchronized and persisted.
    pub committed: bool,
    /// The derived granularity unit changed.
    pub unit_changed: bool,
    /// The host must suppress the platform default (scroll/navigation).
    pub prevent_default: bool,
}

/// Drag and wheel bookkeeping between input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    last_pointer_x: f64,
    wheel_pan_pending_since_ms: Option<i64>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            last_pointer_x: 0.0,
            wheel_pan_pending_since_ms: None,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.mode == InteractionMode::Dragging
    }

    pub fn on_drag_start(&mut self, x: f64) {
        self.mode = InteractionMode::Dragging;
        self.last_pointer_x = x;
    }

    /// Records a pointer position and returns the displacement since the
    /// previous one. Returns `None` when no drag is active.
    pub fn on_drag_move(&mut self, x: f64) -> Option<f64> {
        if !self.is_dragging() {
            return None;
        }
        let delta = x - self.last_pointer_x;
        self.last_pointer_x = x;
        Some(delta)
    }

    /// Ends the drag. Returns `true` when a drag was active.
    pub fn on_drag_end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.mode = InteractionMode::Idle;
        was_dragging
    }

    #[must_use]
    pub fn wheel_pan_pending_since(self) -> Option<i64> {
        self.wheel_pan_pending_since_ms
    }

    pub fn on_wheel_pan(&mut self, now_ms: i64) {
        self.wheel_pan_pending_since_ms = Some(now_ms);
    }

    /// Returns `true` when a pending wheel pan has been idle for at least
    /// `idle_ms`, clearing the pending marker.
    pub fn take_idle_wheel_pan(&mut self, now_ms: i64, idle_ms: i64) -> bool {
        match self.wheel_pan_pending_since_ms {
            Some(since) if now_ms.saturating_sub(since) >= idle_ms => {
                self.wheel_pan_pending_since_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear_wheel_pan(&mut self) -> bool {
        self.wheel_pan_pending_since_ms.take().is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionMode, InteractionState};

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut state = InteractionState::default();
        assert_eq!(state.on_drag_move(10.0), None);

        state.on_drag_start(100.0);
        assert_eq!(state.on_drag_move(130.0), Some(30.0));
        assert_eq!(state.on_drag_move(120.0), Some(-10.0));
        assert!(state.on_drag_end());
        assert!(!state.on_drag_end());
        assert_eq!(state.mode(), InteractionMode::Idle);
    }

    #[test]
    fn wheel_pan_becomes_idle_after_timeout() {
        let mut state = InteractionState::default();
        state.on_wheel_pan(1_000);
        assert!(!state.take_idle_wheel_pan(1_499, 500));
        state.on_wheel_pan(1_400);
        assert!(!state.take_idle_wheel_pan(1_800, 500));
        assert!(state.take_idle_wheel_pan(1_900, 500));
        assert_eq!(state.wheel_pan_pending_since(), None);
    }
}
