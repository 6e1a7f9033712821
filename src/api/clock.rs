use chrono::Utc;

/// Source of the moving upper bound `now()` used by viewport clamps.
pub trait Clock {
    /// Current time in epoch milliseconds.
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually driven clock for tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now_ms: i64,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now_ms: i64) -> Self {
        Self { now_ms }
    }

    pub fn set(&mut self, now_ms: i64) {
        self.now_ms = now_ms;
    }

    pub fn advance(&mut self, delta_ms: i64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}
