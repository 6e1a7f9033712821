use chrono::{Datelike, Months, NaiveDate};

use crate::core::primitives::timestamp_ms_to_datetime;
use crate::core::{DayKey, GranularityUnit, MILLIS_PER_DAY, Viewport};
use crate::render::{AxisConfig, AxisTick};

const AUTO_SKIP_MIN_SPAN_MS: i64 = 30 * MILLIS_PER_DAY;
const FULL_LABEL_FORMAT: &str = "%Y/%m/%d";
const SHORT_LABEL_FORMAT: &str = "%m/%d";

/// Epoch day 0 (1970-01-01) was a Thursday, three days after a Monday.
const EPOCH_DAY_OFFSET_FROM_MONDAY: i64 = 3;

/// Tick positions for `window` at `unit` granularity.
///
/// Day ticks sit on UTC midnights, week ticks on Mondays and month ticks on
/// the first of each month. Only ticks inside the inclusive window are kept.
#[must_use]
pub fn generate_ticks(window: Viewport, unit: GranularityUnit) -> Vec<i64> {
    if !window.is_valid() {
        return Vec::new();
    }
    match unit {
        GranularityUnit::Day => step_ticks(first_midnight_at_or_after(window.min), window.max, 1),
        GranularityUnit::Week => {
            let first = first_midnight_at_or_after(window.min);
            let from_monday = DayKey::from_timestamp_ms(first)
                .days_since_epoch()
                .saturating_add(EPOCH_DAY_OFFSET_FROM_MONDAY)
                .rem_euclid(7);
            let first_monday = first + ((7 - from_monday) % 7) * MILLIS_PER_DAY;
            step_ticks(first_monday, window.max, 7)
        }
        GranularityUnit::Month => month_ticks(window),
    }
}

fn first_midnight_at_or_after(timestamp_ms: i64) -> i64 {
    let start = DayKey::from_timestamp_ms(timestamp_ms).start_ms();
    if start < timestamp_ms {
        start.saturating_add(MILLIS_PER_DAY)
    } else {
        start
    }
}

fn step_ticks(first: i64, last: i64, step_days: i64) -> Vec<i64> {
    let step = step_days * MILLIS_PER_DAY;
    let mut ticks = Vec::new();
    let mut tick = first;
    while tick <= last {
        ticks.push(tick);
        tick = tick.saturating_add(step);
        if tick == i64::MAX {
            break;
        }
    }
    ticks
}

fn month_ticks(window: Viewport) -> Vec<i64> {
    let Some(start) = timestamp_ms_to_datetime(window.min) else {
        return Vec::new();
    };
    let Some(mut month) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    loop {
        let Some(midnight) = month.and_hms_opt(0, 0, 0) else {
            break;
        };
        let tick = midnight.and_utc().timestamp_millis();
        if tick > window.max {
            break;
        }
        if tick >= window.min {
            ticks.push(tick);
        }
        match month.checked_add_months(Months::new(1)) {
            Some(next) => month = next,
            None => break,
        }
    }
    ticks
}

/// Label for one tick.
///
/// The first tick (no predecessor) and any tick whose year differs from its
/// predecessor get the full `YYYY/MM/DD` form; the rest get `MM/DD`.
#[must_use]
pub fn tick_label(timestamp_ms: i64, previous_ms: Option<i64>) -> String {
    let Some(current) = timestamp_ms_to_datetime(timestamp_ms) else {
        return timestamp_ms.to_string();
    };
    let year_changed = previous_ms
        .and_then(timestamp_ms_to_datetime)
        .is_none_or(|previous| previous.year() != current.year());
    let format = if year_changed {
        FULL_LABEL_FORMAT
    } else {
        SHORT_LABEL_FORMAT
    };
    current.format(format).to_string()
}

#[must_use]
pub fn format_tick_labels(ticks: &[i64]) -> Vec<String> {
    ticks
        .iter()
        .enumerate()
        .map(|(index, tick)| {
            let previous = index.checked_sub(1).map(|prev| ticks[prev]);
            tick_label(*tick, previous)
        })
        .collect()
}

/// Axis description for the renderer. Label auto-skipping is allowed only for
/// spans of 30 days or more so short windows label every day.
#[must_use]
pub fn build_axis_config(window: Viewport, unit: GranularityUnit) -> AxisConfig {
    let times = generate_ticks(window, unit);
    let labels = format_tick_labels(&times);
    let ticks = times
        .into_iter()
        .zip(labels)
        .map(|(time, label)| AxisTick { time, label })
        .collect();

    AxisConfig {
        min: window.min,
        max: window.max,
        unit,
        ticks,
        auto_skip: window.span() >= AUTO_SKIP_MIN_SPAN_MS,
    }
}
