//! Host-facing chart context.
//!
//! [`ChartContext`] owns axes, series and trendlines in id-keyed tables.
//! Mutations validate and mark state dirty; [`ChartContext::recompute`] runs
//! one synchronous pass and replaces every output wholesale.

mod axis_controller;
mod host;
mod recompute;
mod series_controller;
mod snapshot;
mod trendline_controller;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::axis::{AxisConfiguration, AxisLayout, GroupingResult};
use crate::core::{DateTimeIntervalType, DoubleRange, SeriesValueView};
use crate::trendline::{TrendlineConfig, TrendlineFit};

pub use host::{ChartHost, NullHost};
pub use snapshot::{AxisSnapshot, ContextSnapshot, TrendlineSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(usize);

impl AxisId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(usize);

impl SeriesId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrendlineId(usize);

impl TrendlineId {
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct AxisEntry {
    config: AxisConfiguration,
    layout: Option<AxisLayout>,
    grouping: Option<GroupingResult>,
}

#[derive(Debug, Clone)]
struct SeriesEntry {
    view: SeriesValueView,
    x_axis: AxisId,
    y_axis: AxisId,
    /// Bumped on every data or visibility change.
    revision: u64,
}

/// Axis state a trendline was last sampled against.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FittedAxisState {
    actual_range: DoubleRange,
    interval_type: Option<DateTimeIntervalType>,
}

#[derive(Debug, Clone)]
struct TrendlineEntry {
    series: SeriesId,
    config: TrendlineConfig,
    fit: TrendlineFit,
    needs_refit: bool,
    /// Series revision the current fit was computed from.
    fitted_revision: Option<u64>,
    fitted_axis: Option<FittedAxisState>,
    /// Bumped when only stroke properties change.
    visual_revision: u64,
}

/// Top-level chart state driven by a host.
pub struct ChartContext<H: ChartHost> {
    host: H,
    axes: IndexMap<AxisId, AxisEntry>,
    series: IndexMap<SeriesId, SeriesEntry>,
    trendlines: IndexMap<TrendlineId, TrendlineEntry>,
    next_id: usize,
    dirty: bool,
    pass_count: u64,
}

impl<H: ChartHost> ChartContext<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            axes: IndexMap::new(),
            series: IndexMap::new(),
            trendlines: IndexMap::new(),
            next_id: 0,
            dirty: false,
            pass_count: 0,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// `true` when a mutation happened after the last [`Self::recompute`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of completed recompute passes.
    #[must_use]
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.host.schedule_redraw();
    }
}
