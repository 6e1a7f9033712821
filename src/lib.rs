//! loc-trend: lines-of-code trend aggregation and time-axis viewport engine.
//!
//! The crate merges per-repository measurement series into chartable
//! datasets and owns the interactive time window (pan, zoom, reset,
//! granularity) of the chart that displays them. Drawing is left to a
//! [`render::Renderer`] implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ViewportController, ViewportControllerConfig};
pub use error::{TrendError, TrendResult};
