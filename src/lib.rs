//! chart-axes: axis range, label and trendline computation core.
//!
//! The crate computes what a chart control needs before it draws anything:
//! actual/visible ranges and nice intervals for numeric, logarithmic,
//! date-time, time-span and category axes, the positioned label and
//! small-tick sequences for those ranges, category grouping/aggregation, and
//! fitted trendlines expressed as Bezier segments.
//!
//! Everything is synchronous pure computation. The host owns layout and
//! rendering and drives the core through [`api::ChartContext`].

pub mod api;
pub mod axis;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod trendline;

pub use api::{AxisId, ChartContext, ChartHost, NullHost, SeriesId, TrendlineId};
pub use error::{ChartError, ChartResult};
