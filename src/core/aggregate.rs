use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::primitives::DayKey;
use crate::core::{EntitySeries, TimePoint};

/// How per-entity series are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One forward-filled line summing every entity.
    #[default]
    All,
    /// One line per entity.
    Selected,
}

/// Combines per-entity series according to `mode`.
///
/// `Selected` returns every series with its points sorted by timestamp.
/// `All` returns exactly one combined series (or nothing for empty input)
/// built by forward-filling each entity's last known daily value and summing
/// across entities for every day on which any entity has a measurement.
#[must_use]
pub fn aggregate(series: &[EntitySeries], mode: DisplayMode) -> Vec<EntitySeries> {
    if series.is_empty() {
        return Vec::new();
    }

    match mode {
        DisplayMode::Selected => series.iter().map(sorted_series).collect(),
        DisplayMode::All => vec![combine_forward_filled(series)],
    }
}

/// Returns a copy of `series` with points in ascending timestamp order.
///
/// The sort is stable, so same-timestamp points keep their input order.
#[must_use]
pub fn sorted_series(series: &EntitySeries) -> EntitySeries {
    let mut points = series.points.clone();
    points.sort_by_key(|point| point.timestamp);
    EntitySeries::new(series.label.clone(), points)
}

/// Collapses a series to one value per UTC day.
///
/// The value with the greatest timestamp wins; equal timestamps resolve to
/// the one appearing later in the input.
#[must_use]
pub fn daily_values(points: &[TimePoint]) -> BTreeMap<DayKey, i64> {
    let mut ordered: Vec<&TimePoint> = points.iter().collect();
    ordered.sort_by_key(|point| point.timestamp);

    let mut daily = BTreeMap::new();
    for point in ordered {
        daily.insert(DayKey::from_timestamp_ms(point.timestamp), point.value);
    }
    daily
}

fn combine_forward_filled(series: &[EntitySeries]) -> EntitySeries {
    let daily: Vec<BTreeMap<DayKey, i64>> = series
        .iter()
        .map(|entity| daily_values(&entity.points))
        .collect();

    let days: BTreeSet<DayKey> = daily.iter().flat_map(|values| values.keys().copied()).collect();

    let mut last_known = vec![0_i64; daily.len()];
    let mut points = Vec::with_capacity(days.len());
    for day in days {
        for (slot, values) in last_known.iter_mut().zip(&daily) {
            if let Some(value) = values.get(&day) {
                *slot = *value;
            }
        }
        let total = last_known
            .iter()
            .fold(0_i64, |sum, value| sum.saturating_add(*value));
        points.push(TimePoint::new(day.start_ms(), total));
    }

    EntitySeries::combined(points)
}
