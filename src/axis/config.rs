use serde::{Deserialize, Serialize};

use crate::axis::format::validate_date_format;
use crate::core::range_math::DEFAULT_MAXIMUM_LABELS;
use crate::core::{BusinessHours, DateTimeIntervalType, Orientation, parse_time_span};
use crate::error::{ChartError, ChartResult};

/// Largest accepted `small_ticks_per_interval`.
pub const MAX_SMALL_TICKS_PER_INTERVAL: u32 = 100;

/// Policy for extending a data-derived range beyond the exact data envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RangePadding {
    /// `Round` on the value axis of the chart orientation, `None` otherwise.
    #[default]
    Auto,
    None,
    /// Snap outward to interval multiples (date-time: to the interval unit).
    Round,
    /// `Round`, then one more interval on each side.
    Additional,
    /// Excel-like heuristic: adds a twentieth of headroom and may pull the
    /// start down to zero.
    Normal,
}

/// When a label is forced at the visible range end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EdgeLabelsVisibilityMode {
    #[default]
    Default,
    /// Always label the range end; date-time axes also skip start alignment.
    AlwaysVisible,
    /// Label the range end while the axis is not zoomed.
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelPlacement {
    #[default]
    OnTicks,
    /// Labels sit between ticks; the index range grows by half a slot on each side.
    BetweenTicks,
}

/// Reduction applied to the Y values sharing one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AggregateFunction {
    #[default]
    None,
    Average,
    Count,
    Max,
    Min,
    Sum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NumericAxisSettings {
    /// Replaces a positive natural range start with zero.
    #[serde(default)]
    pub start_range_from_zero: bool,
    /// Fractional digits kept in label text (default 10, trailing zeros dropped).
    #[serde(default)]
    pub label_decimals: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogarithmicAxisSettings {
    pub base: f64,
}

impl Default for LogarithmicAxisSettings {
    fn default() -> Self {
        Self { base: 10.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DateTimeAxisSettings {
    #[serde(default)]
    pub interval_type: DateTimeIntervalType,
    #[serde(default)]
    pub business_hours: Option<BusinessHours>,
    /// strftime pattern overriding the per-interval-type default.
    #[serde(default)]
    pub label_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TimeSpanAxisSettings {
    /// Interval as time-span text (`hh:mm:ss`); wins over the numeric interval.
    #[serde(default)]
    pub interval: Option<String>,
}

/// Host supplied text for one category slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAxisLabel {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAxisSettings {
    #[serde(default)]
    pub label_placement: LabelPlacement,
    #[serde(default = "default_is_indexed")]
    pub is_indexed: bool,
    #[serde(default)]
    pub aggregate_function: AggregateFunction,
    #[serde(default)]
    pub custom_labels: Vec<CustomAxisLabel>,
}

fn default_is_indexed() -> bool {
    true
}

impl Default for CategoryAxisSettings {
    fn default() -> Self {
        Self {
            label_placement: LabelPlacement::OnTicks,
            is_indexed: true,
            aggregate_function: AggregateFunction::None,
            custom_labels: Vec::new(),
        }
    }
}

/// Axis family with its kind-specific settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "settings")]
pub enum AxisKind {
    Numeric(NumericAxisSettings),
    Logarithmic(LogarithmicAxisSettings),
    DateTime(DateTimeAxisSettings),
    TimeSpan(TimeSpanAxisSettings),
    Category(CategoryAxisSettings),
}

impl Default for AxisKind {
    fn default() -> Self {
        Self::Numeric(NumericAxisSettings::default())
    }
}

/// Host-settable axis configuration, read-only during a computation pass.
///
/// `minimum`/`maximum` are in the axis' own units: raw values for numeric and
/// logarithmic axes, OADate days for date-time, milliseconds for time-span and
/// point indexes for category axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfiguration {
    pub kind: AxisKind,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    /// `None`, zero or NaN select the automatic nice interval.
    #[serde(default)]
    pub interval: Option<f64>,
    #[serde(default)]
    pub range_padding: RangePadding,
    #[serde(default)]
    pub desired_intervals_count: Option<f64>,
    #[serde(default = "default_maximum_labels")]
    pub maximum_labels: f64,
    #[serde(default)]
    pub small_ticks_per_interval: u32,
    #[serde(default)]
    pub edge_labels_visibility: EdgeLabelsVisibilityMode,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default)]
    pub zoom_position: f64,
    #[serde(default = "default_auto_interval_on_zooming")]
    pub enable_auto_interval_on_zooming: bool,
}

fn default_maximum_labels() -> f64 {
    DEFAULT_MAXIMUM_LABELS
}

fn default_zoom_factor() -> f64 {
    1.0
}

fn default_auto_interval_on_zooming() -> bool {
    true
}

impl Default for AxisConfiguration {
    fn default() -> Self {
        Self::new(AxisKind::default())
    }
}

impl AxisConfiguration {
    #[must_use]
    pub fn new(kind: AxisKind) -> Self {
        Self {
            kind,
            orientation: Orientation::Horizontal,
            minimum: None,
            maximum: None,
            interval: None,
            range_padding: RangePadding::Auto,
            desired_intervals_count: None,
            maximum_labels: DEFAULT_MAXIMUM_LABELS,
            small_ticks_per_interval: 0,
            edge_labels_visibility: EdgeLabelsVisibilityMode::Default,
            zoom_factor: 1.0,
            zoom_position: 0.0,
            enable_auto_interval_on_zooming: true,
        }
    }

    #[must_use]
    pub fn numeric() -> Self {
        Self::new(AxisKind::Numeric(NumericAxisSettings::default()))
    }

    #[must_use]
    pub fn logarithmic(base: f64) -> Self {
        Self::new(AxisKind::Logarithmic(LogarithmicAxisSettings { base }))
    }

    #[must_use]
    pub fn date_time() -> Self {
        Self::new(AxisKind::DateTime(DateTimeAxisSettings::default()))
    }

    #[must_use]
    pub fn time_span() -> Self {
        Self::new(AxisKind::TimeSpan(TimeSpanAxisSettings::default()))
    }

    #[must_use]
    pub fn category() -> Self {
        Self::new(AxisKind::Category(CategoryAxisSettings::default()))
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_minimum(mut self, minimum: Option<f64>) -> Self {
        self.minimum = minimum;
        self
    }

    #[must_use]
    pub fn with_maximum(mut self, maximum: Option<f64>) -> Self {
        self.maximum = maximum;
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Option<f64>) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_range_padding(mut self, range_padding: RangePadding) -> Self {
        self.range_padding = range_padding;
        self
    }

    #[must_use]
    pub fn with_desired_intervals_count(mut self, count: Option<f64>) -> Self {
        self.desired_intervals_count = count;
        self
    }

    #[must_use]
    pub fn with_small_ticks_per_interval(mut self, count: u32) -> Self {
        self.small_ticks_per_interval = count;
        self
    }

    #[must_use]
    pub fn with_edge_labels_visibility(mut self, mode: EdgeLabelsVisibilityMode) -> Self {
        self.edge_labels_visibility = mode;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom_factor: f64, zoom_position: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self.zoom_position = zoom_position;
        self
    }

    #[must_use]
    pub fn with_auto_interval_on_zooming(mut self, enabled: bool) -> Self {
        self.enable_auto_interval_on_zooming = enabled;
        self
    }

    /// Validates host configuration before it enters a computation pass.
    pub fn validate(&self) -> ChartResult<()> {
        for (name, bound) in [("minimum", self.minimum), ("maximum", self.maximum)] {
            if bound.is_some_and(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!("axis {name} must be finite")));
            }
        }
        if let (Some(minimum), Some(maximum)) = (self.minimum, self.maximum) {
            if minimum >= maximum {
                return Err(ChartError::InvalidData(
                    "axis minimum must be below maximum".to_owned(),
                ));
            }
        }
        if self.interval.is_some_and(|value| value < 0.0 || value.is_infinite()) {
            return Err(ChartError::InvalidData(
                "axis interval must be finite and >= 0".to_owned(),
            ));
        }
        if self
            .desired_intervals_count
            .is_some_and(|value| !value.is_finite() || value <= 0.0)
        {
            return Err(ChartError::InvalidData(
                "desired intervals count must be finite and > 0".to_owned(),
            ));
        }
        if self.small_ticks_per_interval > MAX_SMALL_TICKS_PER_INTERVAL {
            return Err(ChartError::InvalidData(format!(
                "small ticks per interval must be <= {MAX_SMALL_TICKS_PER_INTERVAL}"
            )));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 || self.zoom_factor > 1.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be in (0, 1]".to_owned(),
            ));
        }
        if !self.zoom_position.is_finite() || !(0.0..=1.0).contains(&self.zoom_position) {
            return Err(ChartError::InvalidData(
                "zoom position must be in [0, 1]".to_owned(),
            ));
        }

        match &self.kind {
            AxisKind::Numeric(_) | AxisKind::Category(_) => Ok(()),
            AxisKind::Logarithmic(settings) => {
                if !settings.base.is_finite() || settings.base <= 0.0 || settings.base == 1.0 {
                    return Err(ChartError::InvalidData(
                        "logarithmic base must be finite, > 0 and != 1".to_owned(),
                    ));
                }
                if self.minimum.is_some_and(|value| value <= 0.0)
                    || self.maximum.is_some_and(|value| value <= 0.0)
                {
                    return Err(ChartError::InvalidData(
                        "logarithmic axis bounds must be > 0".to_owned(),
                    ));
                }
                Ok(())
            }
            AxisKind::DateTime(settings) => {
                if let Some(hours) = settings.business_hours {
                    hours.validate()?;
                }
                if let Some(pattern) = settings.label_format.as_deref() {
                    validate_date_format(pattern)?;
                }
                Ok(())
            }
            AxisKind::TimeSpan(settings) => {
                if let Some(text) = settings.interval.as_deref() {
                    let millis = parse_time_span(text)?;
                    if millis < 0.0 {
                        return Err(ChartError::InvalidTimeSpan {
                            input: text.to_owned(),
                            reason: "interval must not be negative",
                        });
                    }
                }
                Ok(())
            }
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize axis configuration: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse axis configuration: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }
}
