mod axis_ticks;
mod clock;
mod controller_config;
mod interaction_controller;
pub mod persistence;
mod query;
mod render_frame_builder;
mod selection;
mod time_scale_controller;
mod time_scale_pan_delta_resolver;

pub use axis_ticks::{build_axis_config, format_tick_labels, generate_ticks, tick_label};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller_config::ViewportControllerConfig;
pub use persistence::{MemoryViewStore, ViewStateStore};
pub use query::{
    EntitySelection, LookbackWindow, StatsQuery, StatsResponse, WireDataset, WirePoint,
    ingest_stats_result,
};
pub use render_frame_builder::{ChartView, chart_title};
pub use selection::DisplaySelection;
pub use time_scale_controller::{PanDirection, ZoomDirection};

use tracing::debug;

use crate::core::{GranularityUnit, Viewport, clamp_window, derive_unit};
use crate::error::TrendResult;
use crate::interaction::{InteractionMode, InteractionState};

/// Owner of a chart's visible time window.
///
/// The controller keeps two viewports: `visible` is the live window shown on
/// every frame and follows continuous gestures immediately, `committed` is the
/// window that drives persistence and summary statistics and only catches up
/// when a gesture completes.
pub struct ViewportController<S: ViewStateStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: ViewportControllerConfig,
    bounds_source: Viewport,
    live: Viewport,
    committed: Viewport,
    unit: GranularityUnit,
    interaction: InteractionState,
}

impl<S: ViewStateStore, C: Clock> ViewportController<S, C> {
    /// Creates a controller for `bounds_source`, restoring the last persisted
    /// viewport when the store holds a valid one.
    pub fn new(
        store: S,
        clock: C,
        config: ViewportControllerConfig,
        bounds_source: Viewport,
    ) -> TrendResult<Self> {
        let config = config.validate()?;
        let now_ms = clock.now_ms();
        let bounds_source = clamp_window(bounds_source, now_ms);

        let visible = match persistence::load_viewport(&store) {
            Some(persisted) => {
                let restored = clamp_window(persisted, now_ms);
                debug!(
                    min = restored.min,
                    max = restored.max,
                    "restored persisted viewport"
                );
                restored
            }
            None => bounds_source,
        };

        Ok(Self {
            store,
            clock,
            config,
            bounds_source,
            live: visible,
            committed: visible,
            unit: derive_unit(visible.span()),
            interaction: InteractionState::default(),
        })
    }

    /// Creates a controller whose bounds come from the persisted lookback
    /// window, falling back to the default lookback.
    pub fn with_persisted_lookback(
        store: S,
        clock: C,
        config: ViewportControllerConfig,
    ) -> TrendResult<Self> {
        let lookback = persistence::load_lookback_days(&store)
            .and_then(|days| LookbackWindow::new(days).ok())
            .unwrap_or_default();
        let bounds_source = lookback.bounds(clock.now_ms());
        Self::new(store, clock, config, bounds_source)
    }

    /// Live window shown to the renderer.
    #[must_use]
    pub fn visible(&self) -> Viewport {
        self.live
    }

    /// Window last synchronized to storage and summary statistics.
    #[must_use]
    pub fn committed(&self) -> Viewport {
        self.committed
    }

    #[must_use]
    pub fn bounds_source(&self) -> Viewport {
        self.bounds_source
    }

    #[must_use]
    pub fn unit(&self) -> GranularityUnit {
        self.unit
    }

    #[must_use]
    pub fn config(&self) -> ViewportControllerConfig {
        self.config
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Updates the plot width used to convert pointer pixels into time.
    pub fn set_plot_width_px(&mut self, width_px: f64) -> TrendResult<()> {
        self.config = self.config.with_plot_width_px(width_px).validate()?;
        Ok(())
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
