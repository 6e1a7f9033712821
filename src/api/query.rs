use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{EntitySeries, MILLIS_PER_DAY, TimePoint, Viewport, clamp_window, parse_timestamp_ms};
use crate::error::{TrendError, TrendResult};

/// Which entities a stats query covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitySelection {
    All,
    Ids(Vec<u64>),
}

impl EntitySelection {
    /// Value of the `repo_ids` query parameter.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::Ids(ids) => ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsQuery {
    pub selection: EntitySelection,
    pub days: u32,
}

impl StatsQuery {
    #[must_use]
    pub fn new(selection: EntitySelection, lookback: LookbackWindow) -> Self {
        Self {
            selection,
            days: lookback.days(),
        }
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!("repo_ids={}&days={}", self.selection.to_param(), self.days)
    }
}

/// Length of history requested from the query collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookbackWindow {
    days: u32,
}

impl LookbackWindow {
    pub const DEFAULT_DAYS: u32 = 30;
    pub const ALL_TIME_DAYS: u32 = 9999;
    pub const PRESET_DAYS: [u32; 5] = [7, 30, 90, 365, Self::ALL_TIME_DAYS];

    pub fn new(days: u32) -> TrendResult<Self> {
        if days == 0 {
            return Err(TrendError::InvalidData(
                "lookback window must cover at least one day".to_owned(),
            ));
        }
        Ok(Self { days })
    }

    #[must_use]
    pub fn presets() -> Vec<Self> {
        Self::PRESET_DAYS.iter().map(|days| Self { days: *days }).collect()
    }

    #[must_use]
    pub fn days(self) -> u32 {
        self.days
    }

    /// `[now - days, now]`, clamped to the supported date range.
    #[must_use]
    pub fn bounds(self, now_ms: i64) -> Viewport {
        let span = i64::from(self.days).saturating_mul(MILLIS_PER_DAY);
        clamp_window(Viewport::new(now_ms.saturating_sub(span), now_ms), now_ms)
    }

    #[must_use]
    pub fn label(self) -> String {
        match self.days {
            365 => "Last 1 Year".to_owned(),
            Self::ALL_TIME_DAYS => "All Time".to_owned(),
            days => format!("Last {days} Days"),
        }
    }
}

impl Default for LookbackWindow {
    fn default() -> Self {
        Self {
            days: Self::DEFAULT_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoint {
    /// ISO-8601 timestamp.
    pub x: String,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDataset {
    pub label: String,
    #[serde(default)]
    pub data: Vec<WirePoint>,
}

/// Payload of the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub datasets: Vec<WireDataset>,
}

impl StatsResponse {
    pub fn from_json_str(input: &str) -> TrendResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| TrendError::InvalidData(format!("failed to parse stats payload: {e}")))
    }

    /// Converts wire datasets into sorted entity series.
    ///
    /// Datasets sharing a label are merged in first-seen order. Points whose
    /// timestamp cannot be parsed are dropped.
    #[must_use]
    pub fn into_entity_series(self) -> Vec<EntitySeries> {
        let mut grouped: IndexMap<String, Vec<TimePoint>> = IndexMap::new();
        let mut dropped = 0_usize;

        for dataset in self.datasets {
            let points = grouped.entry(dataset.label).or_default();
            for point in dataset.data {
                match parse_timestamp_ms(&point.x) {
                    Ok(timestamp) => points.push(TimePoint::new(timestamp, point.y)),
                    Err(err) => {
                        dropped += 1;
                        warn!(error = %err, "dropping wire point with unparseable timestamp");
                    }
                }
            }
        }

        let series: Vec<EntitySeries> = grouped
            .into_iter()
            .map(|(label, mut points)| {
                points.sort_by_key(|point| point.timestamp);
                EntitySeries::new(label, points)
            })
            .collect();
        debug!(
            series_count = series.len(),
            dropped_points = dropped,
            "ingested stats payload"
        );
        series
    }
}

/// Turns the outcome of a stats fetch into series.
///
/// A failed fetch yields no series so the chart shows an empty window rather
/// than stale data.
pub fn ingest_stats_result<E: fmt::Display>(result: Result<StatsResponse, E>) -> Vec<EntitySeries> {
    match result {
        Ok(response) => response.into_entity_series(),
        Err(err) => {
            warn!(error = %err, "stats query failed; rendering empty window");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EntitySelection, LookbackWindow, StatsQuery, StatsResponse};
    use crate::core::{EPOCH_FLOOR_MS, MILLIS_PER_DAY};

    #[test]
    fn query_string_lists_ids_or_all() {
        let all = StatsQuery::new(EntitySelection::All, LookbackWindow::default());
        assert_eq!(all.to_query_string(), "repo_ids=all&days=30");

        let some = StatsQuery::new(
            EntitySelection::Ids(vec![3, 1]),
            LookbackWindow::new(90).expect("lookback"),
        );
        assert_eq!(some.to_query_string(), "repo_ids=3,1&days=90");
    }

    #[test]
    fn all_time_lookback_saturates_at_floor() {
        let now = EPOCH_FLOOR_MS + 400 * MILLIS_PER_DAY;
        let bounds = LookbackWindow::new(LookbackWindow::ALL_TIME_DAYS)
            .expect("lookback")
            .bounds(now);
        assert_eq!(bounds.min, EPOCH_FLOOR_MS);
        assert_eq!(bounds.max, now);

        let month = LookbackWindow::default().bounds(now);
        assert_eq!(month.span(), 30 * MILLIS_PER_DAY);
    }

    #[test]
    fn labels_follow_presets() {
        let labels: Vec<String> = LookbackWindow::presets()
            .into_iter()
            .map(LookbackWindow::label)
            .collect();
        assert_eq!(
            labels,
            vec!["Last 7 Days", "Last 30 Days", "Last 90 Days", "Last 1 Year", "All Time"]
        );
        assert!(LookbackWindow::new(0).is_err());
    }

    #[test]
    fn ingestion_merges_labels_and_sorts_points() {
        let payload = r#"{"datasets":[
            {"label":"api","data":[{"x":"2024-01-03 10:00:00","y":30},{"x":"2024-01-01 10:00:00","y":10}]},
            {"label":"web","data":[{"x":"not a date","y":99}]},
            {"label":"api","data":[{"x":"2024-01-02T10:00:00Z","y":20}]}
        ]}"#;
        let series = StatsResponse::from_json_str(payload)
            .expect("payload")
            .into_entity_series();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "api");
        let values: Vec<i64> = series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10, 20, 30]);
        assert_eq!(series[1].label, "web");
        assert!(series[1].is_empty());
    }
}
