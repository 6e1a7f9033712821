use serde::{Deserialize, Serialize};

use crate::core::{EntitySeries, TimePoint, Viewport};

/// Returns the points of a timestamp-sorted slice that fall inside an
/// inclusive window.
#[must_use]
pub fn points_in_window(points: &[TimePoint], window: Viewport) -> &[TimePoint] {
    let start = points.partition_point(|point| point.timestamp < window.min);
    let end = points.partition_point(|point| point.timestamp <= window.max);
    &points[start..end.max(start)]
}

/// Like [`points_in_window`] but keeps one neighbour on each side so a line
/// drawn from the result still reaches the window edges.
#[must_use]
pub fn points_in_window_with_margin(points: &[TimePoint], window: Viewport) -> &[TimePoint] {
    let start = points.partition_point(|point| point.timestamp < window.min);
    let end = points.partition_point(|point| point.timestamp <= window.max);
    let start = start.saturating_sub(1);
    let end = (end + 1).min(points.len());
    &points[start..end.max(start)]
}

/// Headline numbers for the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of each dataset's latest visible value.
    pub total: i64,
    /// Sum of each dataset's last minus first visible value.
    pub net_change: i64,
}

/// Computes summary statistics over the points of each dataset inside `window`.
///
/// Datasets without visible points contribute nothing.
#[must_use]
pub fn summarize(datasets: &[EntitySeries], window: Viewport) -> SummaryStats {
    datasets
        .iter()
        .fold(SummaryStats::default(), |mut stats, dataset| {
            let visible = points_in_window(&dataset.points, window);
            if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
                stats.total = stats.total.saturating_add(last.value);
                stats.net_change = stats
                    .net_change
                    .saturating_add(last.value.saturating_sub(first.value));
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::{points_in_window, points_in_window_with_margin, summarize};
    use crate::core::{EntitySeries, TimePoint, Viewport};

    fn points() -> Vec<TimePoint> {
        (0..10).map(|i| TimePoint::new(i * 10, i * 100)).collect()
    }

    #[test]
    fn window_is_inclusive_on_both_edges() {
        let points = points();
        let visible = points_in_window(&points, Viewport::new(20, 50));
        assert_eq!(visible.first().map(|p| p.timestamp), Some(20));
        assert_eq!(visible.last().map(|p| p.timestamp), Some(50));
    }

    #[test]
    fn margin_adds_outer_neighbours() {
        let points = points();
        let visible = points_in_window_with_margin(&points, Viewport::new(21, 49));
        assert_eq!(visible.first().map(|p| p.timestamp), Some(20));
        assert_eq!(visible.last().map(|p| p.timestamp), Some(50));

        let none = points_in_window(&points, Viewport::new(200, 300));
        assert!(none.is_empty());
    }

    #[test]
    fn summary_uses_first_and_last_visible_points() {
        let datasets = [
            EntitySeries::new("a", points()),
            EntitySeries::new("b", vec![TimePoint::new(30, 5), TimePoint::new(40, 2)]),
            EntitySeries::new("c", Vec::new()),
        ];
        let stats = summarize(&datasets, Viewport::new(30, 60));
        assert_eq!(stats.total, 600 + 2);
        assert_eq!(stats.net_change, (600 - 300) + (2 - 5));
    }
}
