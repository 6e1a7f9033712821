use serde::{Deserialize, Serialize};

use crate::core::{GranularityUnit, TimePoint};
use crate::error::{TrendError, TrendResult};
use crate::render::SeriesStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderPoint {
    pub x: i64,
    pub y: i64,
}

impl From<TimePoint> for RenderPoint {
    fn from(point: TimePoint) -> Self {
        Self {
            x: point.timestamp,
            y: point.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDataset {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<RenderPoint>,
}

/// One labelled time-axis tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisTick {
    pub time: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min: i64,
    pub max: i64,
    pub unit: GranularityUnit,
    pub ticks: Vec<AxisTick>,
    /// Whether the renderer may hide overlapping tick labels.
    pub auto_skip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimationAlgorithm {
    Lttb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimationDirective {
    pub algorithm: DecimationAlgorithm,
    /// Per-dataset sample budget.
    pub samples: usize,
    /// At least one dataset was downsampled for this frame.
    pub applied: bool,
}

/// Backend-agnostic input for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub title: String,
    pub datasets: Vec<RenderDataset>,
    pub axis: AxisConfig,
    pub decimation: DecimationDirective,
}

impl RenderFrame {
    pub fn validate(&self) -> TrendResult<()> {
        if self.axis.min >= self.axis.max {
            return Err(TrendError::InvalidData(format!(
                "axis range must satisfy min < max (min={}, max={})",
                self.axis.min, self.axis.max
            )));
        }

        for dataset in &self.datasets {
            if dataset
                .points
                .windows(2)
                .any(|pair| pair[0].x > pair[1].x)
            {
                return Err(TrendError::InvalidData(format!(
                    "dataset `{}` points must be sorted by x",
                    dataset.label
                )));
            }
            dataset.style.stroke.validate()?;
            if let Some(fill) = dataset.style.fill {
                fill.validate()?;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.iter().all(|dataset| dataset.points.is_empty())
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.datasets.iter().map(|dataset| dataset.points.len()).sum()
    }
}
