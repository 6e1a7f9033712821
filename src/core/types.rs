use serde::{Deserialize, Serialize};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// 2000-01-01T00:00:00Z in epoch milliseconds.
pub const EPOCH_FLOOR_MS: i64 = 946_684_800_000;

/// Smallest visible span reachable through zoom gestures.
pub const MIN_SPAN_MS: i64 = 7 * MILLIS_PER_DAY;

pub const COMBINED_LABEL: &str = "combined";

/// One measurement of a cumulative counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub value: i64,
}

impl TimePoint {
    #[must_use]
    pub const fn new(timestamp: i64, value: i64) -> Self {
        Self { timestamp, value }
    }
}

/// Measurement history of one tracked entity (repository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySeries {
    pub label: String,
    pub points: Vec<TimePoint>,
}

impl EntitySeries {
    #[must_use]
    pub fn new(label: impl Into<String>, points: Vec<TimePoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    #[must_use]
    pub fn combined(points: Vec<TimePoint>) -> Self {
        Self::new(COMBINED_LABEL, points)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Visible time window of a chart, in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub min: i64,
    pub max: i64,
}

impl Viewport {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min < self.max
    }

    #[must_use]
    pub fn span(self) -> i64 {
        self.max.saturating_sub(self.min)
    }

    #[must_use]
    pub fn center(self) -> i64 {
        self.min + self.span() / 2
    }
}
