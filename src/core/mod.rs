pub mod aggregate;
pub mod decimation;
pub mod granularity;
pub mod primitives;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use aggregate::{DisplayMode, aggregate};
pub use decimation::{DEFAULT_SAMPLE_BUDGET, lttb};
pub use granularity::{GranularityUnit, derive_unit};
pub use primitives::{DayKey, parse_timestamp_ms};
pub use time_scale::clamp_window;
pub use types::{
    COMBINED_LABEL, EPOCH_FLOOR_MS, EntitySeries, MILLIS_PER_DAY, MIN_SPAN_MS, TimePoint,
    Viewport,
};
pub use windowing::{SummaryStats, summarize};
