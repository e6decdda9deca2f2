use serde::{Deserialize, Serialize};

use crate::core::DoubleRange;
use crate::core::primitives::finite_extent;
use crate::error::{ChartError, ChartResult};

/// Series family tag. The core only uses it to pick the trend Y source and to
/// decide category grouping/indexing exemptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesKind {
    #[default]
    Line,
    Spline,
    StepLine,
    Area,
    Column,
    Bar,
    Scatter,
    Bubble,
    /// `y_values = [high, low]`; a single Y sequence means single-value mode.
    RangeColumn,
    /// `y_values = [high, low]`.
    RangeArea,
    /// `y_values = [high, low]`.
    HiLo,
    /// `y_values = [open, high, low, close]`.
    HiLoOpenClose,
    /// `y_values = [open, high, low, close]`.
    Candle,
    Waterfall,
    ErrorBar,
    Histogram,
    Polar,
    Radar,
}

impl SeriesKind {
    #[must_use]
    pub fn is_financial(self) -> bool {
        matches!(self, Self::HiLoOpenClose | Self::Candle)
    }

    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(self, Self::RangeColumn | Self::RangeArea | Self::HiLo)
    }

    #[must_use]
    pub fn is_polar_radar(self) -> bool {
        matches!(self, Self::Polar | Self::Radar)
    }

    /// Kinds that never take part in category grouping.
    #[must_use]
    pub fn is_grouping_exempt(self) -> bool {
        matches!(
            self,
            Self::Waterfall | Self::ErrorBar | Self::Histogram | Self::Polar | Self::Radar
        )
    }

    /// Kinds whose category labels always come from the raw per-point array.
    #[must_use]
    pub fn is_always_indexed(self) -> bool {
        self.is_grouping_exempt()
    }
}

/// Declared type of a series' X values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum XValueType {
    Double,
    DateTime,
    TimeSpan,
    Logarithmic,
    String,
}

/// Typed X values. Date-times are OADate day counts and time spans are
/// milliseconds so all kinds share the numeric range machinery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XValues {
    Double(Vec<f64>),
    DateTime(Vec<f64>),
    TimeSpan(Vec<f64>),
    Logarithmic(Vec<f64>),
    String(Vec<String>),
}

impl XValues {
    #[must_use]
    pub fn value_type(&self) -> XValueType {
        match self {
            Self::Double(_) => XValueType::Double,
            Self::DateTime(_) => XValueType::DateTime,
            Self::TimeSpan(_) => XValueType::TimeSpan,
            Self::Logarithmic(_) => XValueType::Logarithmic,
            Self::String(_) => XValueType::String,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Double(values)
            | Self::DateTime(values)
            | Self::TimeSpan(values)
            | Self::Logarithmic(values) => values.len(),
            Self::String(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view of the values; `None` for string categories.
    #[must_use]
    pub fn numeric(&self) -> Option<&[f64]> {
        match self {
            Self::Double(values)
            | Self::DateTime(values)
            | Self::TimeSpan(values)
            | Self::Logarithmic(values) => Some(values),
            Self::String(_) => None,
        }
    }

    /// Grouping key for the value at `index`; numbers are stringified.
    #[must_use]
    pub fn key_at(&self, index: usize) -> Option<String> {
        match self {
            Self::String(values) => values.get(index).cloned(),
            _ => self
                .numeric()
                .and_then(|values| values.get(index))
                .map(|value| value.to_string()),
        }
    }
}

impl Default for XValues {
    fn default() -> Self {
        Self::Double(Vec::new())
    }
}

/// Read-only snapshot of one series as the core consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeriesValueView {
    #[serde(default)]
    pub kind: SeriesKind,
    pub x_values: XValues,
    /// One or more Y sequences, each parallel to `x_values`.
    pub y_values: Vec<Vec<f64>>,
    #[serde(default)]
    pub is_transposed: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// Range column whose low values are unbound; only the high set is used.
    #[serde(default)]
    pub is_single_value: bool,
}

fn default_visible() -> bool {
    true
}

impl SeriesValueView {
    /// Single-Y series over numeric X values.
    #[must_use]
    pub fn xy(kind: SeriesKind, x_values: Vec<f64>, y_values: Vec<f64>) -> Self {
        Self::new(kind, XValues::Double(x_values), vec![y_values])
    }

    #[must_use]
    pub fn new(kind: SeriesKind, x_values: XValues, y_values: Vec<Vec<f64>>) -> Self {
        Self {
            kind,
            x_values,
            y_values,
            is_transposed: false,
            is_visible: true,
            is_single_value: false,
        }
    }

    #[must_use]
    pub fn with_transposed(mut self, is_transposed: bool) -> Self {
        self.is_transposed = is_transposed;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    #[must_use]
    pub fn with_single_value(mut self, is_single_value: bool) -> Self {
        self.is_single_value = is_single_value;
        self
    }

    #[must_use]
    pub fn data_count(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn x_value_type(&self) -> XValueType {
        self.x_values.value_type()
    }

    /// Checks that every Y sequence is parallel to the X values.
    pub fn validate(&self) -> ChartResult<()> {
        let count = self.data_count();
        if let Some(mismatch) = self.y_values.iter().find(|values| values.len() != count) {
            return Err(ChartError::InvalidData(format!(
                "y sequence length {} does not match x count {count}",
                mismatch.len()
            )));
        }
        Ok(())
    }

    /// Range columns in single-value mode, or carrying only one Y sequence.
    #[must_use]
    pub fn is_single_value_range(&self) -> bool {
        self.kind == SeriesKind::RangeColumn && (self.is_single_value || self.y_values.len() < 2)
    }

    /// The Y sequences that take part in ranges and aggregation: only the
    /// first set for single-value range columns, all of them otherwise.
    #[must_use]
    pub fn active_y_values(&self) -> &[Vec<f64>] {
        if self.is_single_value_range() {
            self.y_values.get(..1).unwrap_or(&[])
        } else {
            &self.y_values
        }
    }

    /// The Y sequence a trendline regresses: close for financial series, low
    /// for range series, the first set otherwise.
    #[must_use]
    pub fn trend_y_values(&self) -> Option<&[f64]> {
        let index = if self.kind.is_financial() {
            3
        } else if self.kind.is_range() && self.active_y_values().len() > 1 {
            1
        } else {
            0
        };
        self.y_values.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub fn x_extent(&self) -> DoubleRange {
        match self.x_values.numeric() {
            Some(values) => finite_extent(values.iter().copied()),
            None if self.data_count() > 0 => {
                DoubleRange::new(0.0, (self.data_count() - 1) as f64)
            }
            None => DoubleRange::EMPTY,
        }
    }

    #[must_use]
    pub fn y_extent(&self) -> DoubleRange {
        finite_extent(self.range_values())
    }

    /// Every value that feeds a value axis, flattened across the active Y sequences.
    pub fn range_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.active_y_values().iter().flatten().copied()
    }
}
