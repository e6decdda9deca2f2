use serde::{Deserialize, Serialize};

/// Closed `[start, end]` interval over doubles.
///
/// Both bounds `NaN` marks the empty range (nothing computed yet). Callers are
/// expected to keep `start <= end` once the range is non-empty; construction
/// does not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleRange {
    pub start: f64,
    pub end: f64,
}

impl DoubleRange {
    pub const EMPTY: Self = Self {
        start: f64::NAN,
        end: f64::NAN,
    };

    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start.is_nan() && self.end.is_nan()
    }

    #[must_use]
    pub fn inside(self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Returns `true` when both bounds are finite and the range has a positive span.
    #[must_use]
    pub fn is_usable(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.end > self.start
    }

    /// Smallest range covering `self` and `other`; empty operands are ignored.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl Default for DoubleRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Point in series coordinates (x in axis units, y in value units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Layout size the host makes available to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}
