//! Axis range engine and label generator.
//!
//! Every axis pass is a pure function of an [`AxisConfiguration`] and an
//! [`AxisInput`]; the resulting [`AxisLayout`] is a fresh value that replaces
//! the previous one wholesale.

pub mod category;
pub mod config;
pub mod date_time;
pub mod format;
pub mod grouping;
pub mod labels;
pub mod logarithmic;
pub mod numeric;
pub mod range;
pub mod time_span;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::finite_extent;
use crate::core::range_math::desired_intervals_count;
use crate::core::{DateTimeIntervalType, DoubleRange, SeriesValueView, Size};
use crate::error::ChartResult;

pub use config::{
    AggregateFunction, AxisConfiguration, AxisKind, CategoryAxisSettings, CustomAxisLabel,
    DateTimeAxisSettings, EdgeLabelsVisibilityMode, LabelPlacement, LogarithmicAxisSettings,
    MAX_SMALL_TICKS_PER_INTERVAL, NumericAxisSettings, RangePadding, TimeSpanAxisSettings,
};
pub use grouping::{GroupingResult, SeriesGrouping, group_category_values};
pub use labels::{AxisLabel, LabelSet};
pub use range::{AxisStep, ResolvedRange};

/// Which series dimension an axis measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisRole {
    #[default]
    X,
    Y,
}

/// Read-only data an axis pass consumes.
#[derive(Debug, Clone)]
pub struct AxisInput<'a> {
    pub role: AxisRole,
    /// Series bound to the axis; hidden ones are skipped.
    pub series: Vec<&'a SeriesValueView>,
    pub available_size: Size,
    /// Category grouping of the bound series, when one applies.
    pub grouping: Option<&'a GroupingResult>,
}

impl<'a> AxisInput<'a> {
    #[must_use]
    pub fn new(role: AxisRole, series: Vec<&'a SeriesValueView>, available_size: Size) -> Self {
        Self {
            role,
            series,
            available_size,
            grouping: None,
        }
    }

    #[must_use]
    pub fn with_grouping(mut self, grouping: Option<&'a GroupingResult>) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &'a SeriesValueView> + '_ {
        self.series.iter().copied().filter(|series| series.is_visible)
    }

    /// `true` when any visible series draws with swapped axes.
    #[must_use]
    pub fn is_transposed(&self) -> bool {
        self.visible_series().any(|series| series.is_transposed)
    }

    /// Finite min/max of the values this axis measures across visible series.
    #[must_use]
    pub fn natural_extent(&self) -> DoubleRange {
        self.visible_series()
            .map(|series| match self.role {
                AxisRole::X => series.x_extent(),
                AxisRole::Y => series.y_extent(),
            })
            .fold(DoubleRange::EMPTY, DoubleRange::union)
    }

    /// Smallest strictly positive measured value, if any.
    #[must_use]
    pub fn min_positive_value(&self) -> Option<f64> {
        let positive = |value: &f64| *value > 0.0;
        let extent = match self.role {
            AxisRole::X => finite_extent(
                self.visible_series()
                    .flat_map(|series| series.x_values.numeric().unwrap_or(&[]).iter().copied())
                    .filter(positive),
            ),
            AxisRole::Y => finite_extent(
                self.visible_series()
                    .flat_map(SeriesValueView::range_values)
                    .filter(positive),
            ),
        };
        (!extent.is_empty()).then_some(extent.start)
    }

    /// Largest point count among visible series.
    #[must_use]
    pub fn max_data_count(&self) -> usize {
        self.visible_series()
            .map(SeriesValueView::data_count)
            .max()
            .unwrap_or(0)
    }
}

/// Output of one axis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub actual_range: DoubleRange,
    pub actual_interval: f64,
    pub visible_range: DoubleRange,
    pub visible_interval: f64,
    /// Resolved date-time granularity of the actual range (date-time axes only).
    pub actual_interval_type: Option<DateTimeIntervalType>,
    pub visible_interval_type: Option<DateTimeIntervalType>,
    pub is_zoomed: bool,
    pub desired_intervals_count: f64,
    pub labels: Vec<AxisLabel>,
    pub small_ticks: Vec<f64>,
}

/// Per-kind range, interval and label behavior.
pub(crate) trait AxisStrategy {
    /// Actual range after overrides and padding, with the interval it was built from.
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange;

    /// Interval for a zoomed window when auto-interval-on-zoom is enabled.
    fn visible_step(
        &self,
        config: &AxisConfiguration,
        visible: DoubleRange,
        desired: f64,
    ) -> AxisStep;

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        input: &AxisInput<'_>,
    ) -> LabelSet;
}

impl AxisKind {
    pub(crate) fn strategy(&self) -> &dyn AxisStrategy {
        match self {
            Self::Numeric(settings) => settings,
            Self::Logarithmic(settings) => settings,
            Self::DateTime(settings) => settings,
            Self::TimeSpan(settings) => settings,
            Self::Category(settings) => settings,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Logarithmic(_) => "logarithmic",
            Self::DateTime(_) => "date_time",
            Self::TimeSpan(_) => "time_span",
            Self::Category(_) => "category",
        }
    }
}

/// Runs the range engine and label generator for one axis.
///
/// Configuration errors are the only failure; degenerate data is absorbed
/// into a valid layout.
pub fn compute_axis_layout(
    config: &AxisConfiguration,
    input: &AxisInput<'_>,
) -> ChartResult<AxisLayout> {
    config.validate()?;

    let desired = config.desired_intervals_count.unwrap_or_else(|| {
        desired_intervals_count(input.available_size, config.orientation, config.maximum_labels)
    });
    let strategy = config.kind.strategy();
    let actual = strategy.actual_range(config, input, desired);

    let (visible_range, is_zoomed) =
        range::zoomed_range(actual.range, config.zoom_factor, config.zoom_position);
    let visible_step = if is_zoomed && config.enable_auto_interval_on_zooming {
        strategy.visible_step(config, visible_range, desired)
    } else {
        actual.step
    };

    let mut layout = AxisLayout {
        actual_range: actual.range,
        actual_interval: actual.step.interval,
        visible_range,
        visible_interval: visible_step.interval,
        actual_interval_type: actual.step.interval_type,
        visible_interval_type: visible_step.interval_type,
        is_zoomed,
        desired_intervals_count: desired,
        labels: Vec::new(),
        small_ticks: Vec::new(),
    };
    let LabelSet {
        labels,
        small_ticks,
    } = strategy.labels(config, &layout, input);
    layout.labels = labels;
    layout.small_ticks = small_ticks;

    debug!(
        kind = config.kind.name(),
        start = layout.actual_range.start,
        end = layout.actual_range.end,
        interval = layout.actual_interval,
        is_zoomed,
        "computed axis layout"
    );
    trace!(
        labels = layout.labels.len(),
        small_ticks = layout.small_ticks.len(),
        "generated axis labels"
    );
    Ok(layout)
}
