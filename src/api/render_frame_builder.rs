use tracing::trace;

use crate::core::windowing::points_in_window_with_margin;
use crate::core::{DisplayMode, EntitySeries, SummaryStats, aggregate, lttb, summarize};
use crate::error::TrendResult;
use crate::render::{
    AxisConfig, DecimationAlgorithm, DecimationDirective, RenderDataset, RenderFrame,
    RenderPoint, Renderer, SeriesStyle,
};

use super::{Clock, ViewStateStore, ViewportController, build_axis_config};

const ALL_TITLE: &str = "All Repositories Overview";
const EMPTY_SELECTION_TITLE: &str = "No Repositories Selected";
const TITLE_SUFFIX: &str = " LOC Trend";

/// Everything the presentation layer needs for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub frame: RenderFrame,
    /// Computed from undecimated data over the committed viewport.
    pub summary: SummaryStats,
}

/// Chart heading for the current display mode.
#[must_use]
pub fn chart_title(mode: DisplayMode, series: &[EntitySeries]) -> String {
    let subject = match mode {
        DisplayMode::All => ALL_TITLE.to_owned(),
        DisplayMode::Selected if series.is_empty() => EMPTY_SELECTION_TITLE.to_owned(),
        DisplayMode::Selected => series
            .iter()
            .map(|entity| entity.label.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    };
    format!("{subject}{TITLE_SUFFIX}")
}

impl<S: ViewStateStore, C: Clock> ViewportController<S, C> {
    /// Axis description for the live viewport.
    #[must_use]
    pub fn axis_config(&self) -> AxisConfig {
        build_axis_config(self.live, self.unit)
    }

    /// Aggregates `series` and builds the render frame plus summary numbers.
    #[must_use]
    pub fn build_view(&self, series: &[EntitySeries], mode: DisplayMode) -> ChartView {
        let datasets = aggregate(series, mode);
        let summary = summarize(&datasets, self.committed);
        let frame = self.frame_from_datasets(chart_title(mode, series), &datasets);
        ChartView { frame, summary }
    }

    #[must_use]
    pub fn build_render_frame(&self, series: &[EntitySeries], mode: DisplayMode) -> RenderFrame {
        let datasets = aggregate(series, mode);
        self.frame_from_datasets(chart_title(mode, series), &datasets)
    }

    /// Summary numbers over the committed viewport.
    #[must_use]
    pub fn summary_stats(&self, series: &[EntitySeries], mode: DisplayMode) -> SummaryStats {
        summarize(&aggregate(series, mode), self.committed)
    }

    /// Builds a frame for `series` and hands it to `renderer`.
    pub fn render<R: Renderer>(
        &self,
        renderer: &mut R,
        series: &[EntitySeries],
        mode: DisplayMode,
    ) -> TrendResult<ChartView> {
        let view = self.build_view(series, mode);
        renderer.render(&view.frame)?;
        Ok(view)
    }

    fn frame_from_datasets(&self, title: String, datasets: &[EntitySeries]) -> RenderFrame {
        let budget = self.config.sample_budget;
        let mut applied = false;

        let rendered = datasets
            .iter()
            .enumerate()
            .map(|(index, dataset)| {
                let visible = points_in_window_with_margin(&dataset.points, self.live);
                let points = if visible.len() > budget {
                    applied = true;
                    trace!(
                        label = %dataset.label,
                        original = visible.len(),
                        budget,
                        "decimating dataset"
                    );
                    lttb(visible, budget)
                } else {
                    visible.to_vec()
                };
                RenderDataset {
                    label: dataset.label.clone(),
                    style: SeriesStyle::for_index(index, datasets.len()),
                    points: points.into_iter().map(RenderPoint::from).collect(),
                }
            })
            .collect();

        RenderFrame {
            title,
            datasets: rendered,
            axis: self.axis_config(),
            decimation: DecimationDirective {
                algorithm: DecimationAlgorithm::Lttb,
                samples: budget,
                applied,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::chart_title;
    use crate::core::{DisplayMode, EntitySeries};

    #[test]
    fn titles_follow_mode_and_labels() {
        let series = [
            EntitySeries::new("api", Vec::new()),
            EntitySeries::new("web", Vec::new()),
        ];
        assert_eq!(
            chart_title(DisplayMode::All, &series),
            "All Repositories Overview LOC Trend"
        );
        assert_eq!(
            chart_title(DisplayMode::Selected, &series),
            "api, web LOC Trend"
        );
        assert_eq!(
            chart_title(DisplayMode::Selected, &[]),
            "No Repositories Selected LOC Trend"
        );
    }
}
