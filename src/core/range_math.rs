use crate::core::{DoubleRange, Orientation, Size};

/// Interval multipliers scanned coarse-to-fine against a power-of-ten base.
pub const INTERVAL_DIVISIONS: [f64; 5] = [10.0, 5.0, 2.5, 2.0, 1.0];

/// Default `maximum_labels` per 100 pixels used to derive a desired interval count.
pub const DEFAULT_MAXIMUM_LABELS: f64 = 3.0;

const HORIZONTAL_LABEL_DENSITY: f64 = 0.54;
const VERTICAL_LABEL_DENSITY: f64 = 1.0;

/// Picks a human friendly step for `range`.
///
/// The base is the power of ten below `delta / desired_intervals_count`; the
/// multipliers in [`INTERVAL_DIVISIONS`] are walked from the largest down and
/// the last one that still yields no more than `desired_intervals_count`
/// divisions wins. A non-positive or non-finite delta yields `1.0`.
#[must_use]
pub fn calculate_nice_interval(range: DoubleRange, desired_intervals_count: f64) -> f64 {
    let delta = range.delta();
    if !delta.is_finite() || delta <= 0.0 {
        return 1.0;
    }
    let desired = sanitize_desired_count(desired_intervals_count);

    let mut nice_interval = delta / desired;
    let base = 10_f64.powf(nice_interval.log10().floor());
    for multiplier in INTERVAL_DIVISIONS {
        let candidate = base * multiplier;
        if desired < delta / candidate {
            break;
        }
        nice_interval = candidate;
    }
    nice_interval
}

/// Nice interval for logarithmic axes, floored to whole log units (at least 1).
#[must_use]
pub fn calculate_log_nice_interval(range: DoubleRange, desired_intervals_count: f64) -> f64 {
    calculate_nice_interval(range, desired_intervals_count)
        .floor()
        .max(1.0)
}

/// Number of intervals an axis of `available_size` should aim for.
///
/// Horizontal axes use the width at 0.54 labels per `maximum_labels` unit,
/// vertical axes use the full height. Never less than one.
#[must_use]
pub fn desired_intervals_count(
    available_size: Size,
    orientation: Orientation,
    maximum_labels: f64,
) -> f64 {
    let (extent, density) = match orientation {
        Orientation::Horizontal => (available_size.width, HORIZONTAL_LABEL_DENSITY),
        Orientation::Vertical => (available_size.height, VERTICAL_LABEL_DENSITY),
    };
    let maximum_labels = if maximum_labels.is_finite() && maximum_labels > 0.0 {
        maximum_labels
    } else {
        DEFAULT_MAXIMUM_LABELS
    };
    let adjusted = extent * density * maximum_labels / 100.0;
    if adjusted.is_finite() {
        adjusted.max(1.0)
    } else {
        1.0
    }
}

/// Moves a linear range into whole log units of `base`.
///
/// A bound whose logarithm is not finite (zero, negative or NaN input) is kept
/// untransformed instead of becoming `-inf`/NaN. Start is floored, end ceiled.
#[must_use]
pub fn log_transform(range: DoubleRange, base: f64) -> DoubleRange {
    if range.is_empty() {
        return range;
    }
    let start = log_or_raw(range.start, base).floor();
    let end = log_or_raw(range.end, base).ceil();
    DoubleRange::new(start, end)
}

/// `log_base(value)`, falling back to `value` itself when the result is not finite.
#[must_use]
pub fn log_or_raw(value: f64, base: f64) -> f64 {
    let log = log_base(value, base);
    if log.is_finite() { log } else { value }
}

/// `log_base(value)` using the exact `log10`/`log2` paths for their bases.
#[must_use]
pub fn log_base(value: f64, base: f64) -> f64 {
    if base == 10.0 {
        value.log10()
    } else if base == 2.0 {
        value.log2()
    } else {
        value.log(base)
    }
}

/// An interval of zero, NaN or infinity means "compute automatically".
#[must_use]
pub fn explicit_interval(interval: Option<f64>) -> Option<f64> {
    interval.filter(|value| value.is_finite() && *value > 0.0)
}

fn sanitize_desired_count(desired_intervals_count: f64) -> f64 {
    if desired_intervals_count.is_finite() && desired_intervals_count > 0.0 {
        desired_intervals_count
    } else {
        1.0
    }
}
