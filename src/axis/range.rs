use serde::{Deserialize, Serialize};

use crate::axis::config::RangePadding;
use crate::core::{DateTimeIntervalType, DoubleRange, Orientation};

/// Headroom added by `Normal` padding, as a fraction of the span.
const NORMAL_PADDING_FRACTION: f64 = 1.0 / 20.0;
/// `Normal` padding snaps to the next boundary when the remainder is this
/// fraction of an interval or less.
const NORMAL_PADDING_SNAP: f64 = 0.365;
/// `Normal` padding starts at zero when the data start is below this share of the end.
const NORMAL_PADDING_ZERO_RATIO: f64 = 5.0 / 6.0;

/// Interval plus the date-time granularity it is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisStep {
    pub interval: f64,
    pub interval_type: Option<DateTimeIntervalType>,
}

impl AxisStep {
    #[must_use]
    pub fn plain(interval: f64) -> Self {
        Self {
            interval,
            interval_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub range: DoubleRange,
    pub step: AxisStep,
}

impl ResolvedRange {
    #[must_use]
    pub fn new(range: DoubleRange, step: AxisStep) -> Self {
        Self { range, step }
    }
}

/// Resolves `Auto` to `Round` on the value axis and `None` elsewhere.
///
/// The value axis is the vertical one, or the horizontal one when the bound
/// series are transposed.
#[must_use]
pub fn resolve_padding(
    padding: RangePadding,
    orientation: Orientation,
    is_transposed: bool,
) -> RangePadding {
    match padding {
        RangePadding::Auto => {
            let is_value_axis = (orientation == Orientation::Vertical) != is_transposed;
            if is_value_axis {
                RangePadding::Round
            } else {
                RangePadding::None
            }
        }
        other => other,
    }
}

/// Applies a numeric padding policy to `range`.
///
/// `interval_for` recomputes the interval when `Normal` padding moves the
/// start to zero. `Auto` is treated as `None`; resolve it first.
pub fn pad_numeric(
    range: DoubleRange,
    interval: f64,
    padding: RangePadding,
    interval_for: &dyn Fn(DoubleRange) -> f64,
) -> ResolvedRange {
    if !range.is_usable() || !interval.is_finite() || interval <= 0.0 {
        return ResolvedRange::new(range, AxisStep::plain(interval));
    }
    let padded = match padding {
        RangePadding::Auto | RangePadding::None => range,
        RangePadding::Round => round_to_interval(range, interval),
        RangePadding::Additional => {
            let rounded = round_to_interval(range, interval);
            DoubleRange::new(rounded.start - interval, rounded.end + interval)
        }
        RangePadding::Normal => return pad_normal(range, interval, interval_for),
    };
    ResolvedRange::new(padded, AxisStep::plain(interval))
}

fn round_to_interval(range: DoubleRange, interval: f64) -> DoubleRange {
    DoubleRange::new(
        (range.start / interval).floor() * interval,
        (range.end / interval).ceil() * interval,
    )
}

fn pad_normal(
    range: DoubleRange,
    interval: f64,
    interval_for: &dyn Fn(DoubleRange) -> f64,
) -> ResolvedRange {
    let (minimum, headroom_base) = if range.start < 0.0 {
        let mut minimum = range.start + range.start * NORMAL_PADDING_FRACTION;
        let remaining = interval + minimum % interval;
        if NORMAL_PADDING_SNAP * interval >= remaining {
            minimum -= interval;
        }
        if minimum % interval < 0.0 {
            minimum = (minimum - interval) - minimum % interval;
        }
        (minimum, 0.0)
    } else {
        let mut minimum = if range.start < NORMAL_PADDING_ZERO_RATIO * range.end {
            0.0
        } else {
            range.start - (range.end - range.start) / 2.0
        };
        if minimum % interval > 0.0 {
            minimum -= minimum % interval;
        }
        (minimum, range.start)
    };

    let mut maximum = range.end + (range.end - headroom_base) * NORMAL_PADDING_FRACTION;
    let remaining = interval - maximum % interval;
    if NORMAL_PADDING_SNAP * interval >= remaining {
        maximum += interval;
    }
    if maximum % interval > 0.0 {
        maximum = (maximum + interval) - maximum % interval;
    }

    if minimum == 0.0 {
        let interval = interval_for(DoubleRange::new(minimum, maximum));
        if interval.is_finite() && interval > 0.0 {
            let end = (maximum / interval).ceil() * interval;
            return ResolvedRange::new(DoubleRange::new(0.0, end), AxisStep::plain(interval));
        }
    }
    ResolvedRange::new(DoubleRange::new(minimum, maximum), AxisStep::plain(interval))
}

/// Combines explicit bounds with the data-derived range.
///
/// Both bounds set: exactly `[minimum, maximum]`, unpadded. Neither set: the
/// natural range, padded. One set: the natural range with that bound spliced
/// in is padded, then the given bound is restored.
pub fn apply_overrides(
    minimum: Option<f64>,
    maximum: Option<f64>,
    natural: DoubleRange,
    step_for: &dyn Fn(DoubleRange) -> AxisStep,
    pad: &dyn Fn(DoubleRange, AxisStep) -> ResolvedRange,
) -> ResolvedRange {
    match (minimum, maximum) {
        (Some(minimum), Some(maximum)) => {
            let range = DoubleRange::new(minimum, maximum);
            ResolvedRange::new(range, step_for(range))
        }
        (None, None) => pad(natural, step_for(natural)),
        (Some(minimum), None) => {
            let end = if natural.end > minimum {
                natural.end
            } else {
                minimum + 1.0
            };
            let spliced = DoubleRange::new(minimum, end);
            let padded = pad(spliced, step_for(spliced));
            ResolvedRange::new(DoubleRange::new(minimum, padded.range.end), padded.step)
        }
        (None, Some(maximum)) => {
            let start = if natural.start < maximum {
                natural.start
            } else {
                maximum - 1.0
            };
            let spliced = DoubleRange::new(start, maximum);
            let padded = pad(spliced, step_for(spliced));
            ResolvedRange::new(DoubleRange::new(padded.range.start, maximum), padded.step)
        }
    }
}

/// Substitutes `[0, 1]` for an empty range and `[v, v + width]` for a zero-width one.
#[must_use]
pub fn widen_degenerate(range: DoubleRange, width: f64) -> DoubleRange {
    if range.is_empty() || !range.start.is_finite() || !range.end.is_finite() {
        DoubleRange::new(0.0, 1.0)
    } else if range.delta() == 0.0 {
        DoubleRange::new(range.start, range.start + width)
    } else {
        range
    }
}

/// Visible window of `actual` for a zoom factor/position pair.
///
/// The window is `[start + position * delta, + factor * delta]`, shifted back
/// inside `actual` when it would overrun the end. The flag reports whether the
/// clamped window differs from `actual`.
#[must_use]
pub fn zoomed_range(
    actual: DoubleRange,
    zoom_factor: f64,
    zoom_position: f64,
) -> (DoubleRange, bool) {
    if !(zoom_factor < 1.0 || zoom_position > 0.0) || !actual.is_usable() {
        return (actual, false);
    }
    let factor = zoom_factor.clamp(f64::MIN_POSITIVE, 1.0);
    let position = zoom_position.clamp(0.0, 1.0 - factor);
    let delta = actual.delta();
    let start = actual.start + position * delta;
    let end = if factor >= 1.0 {
        actual.end
    } else {
        (start + factor * delta).min(actual.end)
    };
    let is_zoomed = start != actual.start || end != actual.end;
    (DoubleRange::new(start, end), is_zoomed)
}

#[cfg(test)]
mod tests {
    use super::{RangePadding, pad_numeric, resolve_padding, zoomed_range};
    use crate::core::{DoubleRange, Orientation};

    fn no_recompute(_: DoubleRange) -> f64 {
        f64::NAN
    }

    #[test]
    fn auto_padding_rounds_only_the_value_axis() {
        assert_eq!(
            resolve_padding(RangePadding::Auto, Orientation::Vertical, false),
            RangePadding::Round
        );
        assert_eq!(
            resolve_padding(RangePadding::Auto, Orientation::Horizontal, false),
            RangePadding::None
        );
        assert_eq!(
            resolve_padding(RangePadding::Auto, Orientation::Horizontal, true),
            RangePadding::Round
        );
    }

    #[test]
    fn additional_adds_one_interval_past_round() {
        let padded = pad_numeric(
            DoubleRange::new(3.0, 97.0),
            20.0,
            RangePadding::Additional,
            &no_recompute,
        );
        assert_eq!(padded.range, DoubleRange::new(-20.0, 120.0));
    }

    #[test]
    fn normal_pulls_low_start_to_zero() {
        let padded = pad_numeric(
            DoubleRange::new(10.0, 90.0),
            20.0,
            RangePadding::Normal,
            &|range| range.delta() / 5.0,
        );
        assert_eq!(padded.range.start, 0.0);
        assert!(padded.range.end >= 90.0);
    }

    #[test]
    fn normal_pushes_negative_start_down_by_a_twentieth() {
        let padded = pad_numeric(
            DoubleRange::new(-7.0, 93.0),
            20.0,
            RangePadding::Normal,
            &no_recompute,
        );
        assert_eq!(padded.range, DoubleRange::new(-20.0, 120.0));
        assert_eq!(padded.step.interval, 20.0);
    }

    #[test]
    fn normal_snaps_negative_start_within_the_threshold() {
        let padded = pad_numeric(
            DoubleRange::new(-97.0, -3.0),
            20.0,
            RangePadding::Normal,
            &no_recompute,
        );
        assert_eq!(padded.range, DoubleRange::new(-120.0, -3.15));
    }

    #[test]
    fn normal_keeps_high_start_off_zero() {
        let coarse = pad_numeric(
            DoubleRange::new(90.0, 100.0),
            20.0,
            RangePadding::Normal,
            &no_recompute,
        );
        assert_eq!(coarse.range, DoubleRange::new(80.0, 120.0));

        let fine = pad_numeric(
            DoubleRange::new(90.0, 100.0),
            5.0,
            RangePadding::Normal,
            &no_recompute,
        );
        assert_eq!(fine.range, DoubleRange::new(85.0, 105.0));
    }

    #[test]
    fn full_window_is_not_zoomed() {
        let actual = DoubleRange::new(0.0, 100.0);
        assert_eq!(zoomed_range(actual, 1.0, 0.4), (actual, false));
        assert_eq!(zoomed_range(actual, 1.0, 0.0), (actual, false));
    }

    #[test]
    fn zoom_window_stays_inside_actual_range() {
        let (visible, zoomed) = zoomed_range(DoubleRange::new(0.0, 100.0), 0.5, 0.75);
        assert!(zoomed);
        assert_eq!(visible, DoubleRange::new(50.0, 100.0));
    }
}
