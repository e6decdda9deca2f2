use chrono::NaiveDateTime;
use tracing::warn;

use crate::axis::config::{
    AxisConfiguration, DateTimeAxisSettings, EdgeLabelsVisibilityMode, RangePadding,
};
use crate::axis::format::format_date_label;
use crate::axis::labels::{AxisLabel, LabelSet, forces_edge_label, push_edge_label, step_limit};
use crate::axis::range::{AxisStep, ResolvedRange, apply_overrides, widen_degenerate};
use crate::axis::{AxisInput, AxisLayout, AxisStrategy};
use crate::core::date_time::unit_key;
use crate::core::primitives::MILLIS_PER_DAY;
use crate::core::range_math::{calculate_nice_interval, explicit_interval};
use crate::core::{
    BusinessHours, DateTimeIntervalType, DoubleRange, align_range_start, end_of_unit,
    from_oa_date, increase_interval, to_oa_date,
};

/// Half a millisecond in OADate days; OADate decoding rounds to milliseconds.
const POSITION_TOLERANCE: f64 = 0.5 / MILLIS_PER_DAY;

/// Converts a span of days into `unit` counts (years as 365 days, months as 30).
#[must_use]
pub fn days_to_units(days: f64, unit: DateTimeIntervalType) -> f64 {
    match unit {
        DateTimeIntervalType::Auto | DateTimeIntervalType::Days => days,
        DateTimeIntervalType::Years => days / 365.0,
        DateTimeIntervalType::Months => days / 30.0,
        DateTimeIntervalType::Hours => days * 24.0,
        DateTimeIntervalType::Minutes => days * 1_440.0,
        DateTimeIntervalType::Seconds => days * 86_400.0,
        DateTimeIntervalType::Milliseconds => days * MILLIS_PER_DAY,
    }
}

/// Picks the coarsest granularity whose nice interval is at least one unit.
///
/// Tiers run from years down to milliseconds; milliseconds is taken
/// unconditionally when every coarser tier yields a fractional step.
#[must_use]
pub fn calculate_date_time_interval(
    range: DoubleRange,
    desired_intervals_count: f64,
) -> AxisStep {
    let days = range.delta();
    for unit in DateTimeIntervalType::TIERS {
        let span = DoubleRange::new(0.0, days_to_units(days, unit));
        let interval = calculate_nice_interval(span, desired_intervals_count);
        if interval >= 1.0 || unit == DateTimeIntervalType::Milliseconds {
            return AxisStep {
                interval,
                interval_type: Some(unit),
            };
        }
    }
    AxisStep {
        interval: 1.0,
        interval_type: Some(DateTimeIntervalType::Milliseconds),
    }
}

impl DateTimeAxisSettings {
    /// Interval and granularity for `range` under this axis' interval type.
    #[must_use]
    pub fn resolve_step(
        &self,
        explicit: Option<f64>,
        range: DoubleRange,
        desired: f64,
    ) -> AxisStep {
        match (self.interval_type, explicit) {
            (DateTimeIntervalType::Auto, None) => calculate_date_time_interval(range, desired),
            (DateTimeIntervalType::Auto, Some(interval)) => AxisStep {
                interval,
                interval_type: calculate_date_time_interval(range, desired).interval_type,
            },
            (unit, Some(interval)) => AxisStep {
                interval,
                interval_type: Some(unit),
            },
            (unit, None) => {
                let span = DoubleRange::new(0.0, days_to_units(range.delta(), unit));
                AxisStep {
                    interval: calculate_nice_interval(span, desired),
                    interval_type: Some(unit),
                }
            }
        }
    }

    fn pad(&self, range: DoubleRange, step: AxisStep, padding: RangePadding) -> ResolvedRange {
        let unit = step.interval_type.unwrap_or(DateTimeIntervalType::Days);
        let padded = match padding {
            RangePadding::Auto | RangePadding::None => range,
            RangePadding::Round | RangePadding::Normal => {
                round_to_unit(range, step.interval, unit, false)
            }
            RangePadding::Additional => round_to_unit(range, step.interval, unit, true),
        };
        let padded = match self.business_hours {
            Some(hours) => clamp_to_business_hours(padded, hours),
            None => padded,
        };
        ResolvedRange::new(padded, step)
    }

    /// First label date: the open time of the aligned day for day-or-coarser
    /// steps, the next open instant otherwise.
    fn business_start(
        hours: BusinessHours,
        date: NaiveDateTime,
        unit: DateTimeIntervalType,
    ) -> Option<NaiveDateTime> {
        match unit {
            DateTimeIntervalType::Years
            | DateTimeIntervalType::Months
            | DateTimeIntervalType::Days
            | DateTimeIntervalType::Auto => hours
                .open_on(date.date())
                .and_then(|open| hours.clamp_start(open)),
            _ => hours.clamp_start(date),
        }
    }

    fn label(
        &self,
        position: f64,
        date: NaiveDateTime,
        unit: DateTimeIntervalType,
        is_transition: bool,
    ) -> AxisLabel {
        AxisLabel {
            position,
            content: format_date_label(date, unit, is_transition, self.label_format.as_deref()),
            label_value: position,
            interval_type: Some(unit),
            is_transition,
        }
    }
}

fn round_to_unit(
    range: DoubleRange,
    interval: f64,
    unit: DateTimeIntervalType,
    additional: bool,
) -> DoubleRange {
    let (Some(start), Some(end)) = (from_oa_date(range.start), from_oa_date(range.end)) else {
        return range;
    };
    let mut start = align_range_start(start, interval, unit);
    let mut end = end_of_unit(end, unit);
    if additional {
        start = increase_interval(start, -interval, unit).unwrap_or(start);
        end = increase_interval(end, interval, unit).unwrap_or(end);
    }
    DoubleRange::new(to_oa_date(start), to_oa_date(end))
}

fn clamp_to_business_hours(range: DoubleRange, hours: BusinessHours) -> DoubleRange {
    let start = from_oa_date(range.start).and_then(|date| hours.clamp_start(date));
    let end = from_oa_date(range.end).and_then(|date| hours.clamp_end(date));
    match (start, end) {
        (Some(start), Some(end)) if end > start => {
            DoubleRange::new(to_oa_date(start), to_oa_date(end))
        }
        _ => range,
    }
}

impl AxisStrategy for DateTimeAxisSettings {
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange {
        let explicit = explicit_interval(config.interval);
        let padding = match config.range_padding {
            RangePadding::Auto => RangePadding::None,
            other => other,
        };

        apply_overrides(
            config.minimum,
            config.maximum,
            widen_degenerate(input.natural_extent(), 1.0),
            &|range| self.resolve_step(explicit, range, desired),
            &|range, step| self.pad(range, step, padding),
        )
    }

    fn visible_step(
        &self,
        config: &AxisConfiguration,
        visible: DoubleRange,
        desired: f64,
    ) -> AxisStep {
        self.resolve_step(explicit_interval(config.interval), visible, desired)
    }

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        _input: &AxisInput<'_>,
    ) -> LabelSet {
        let range = layout.visible_range;
        let interval = layout.visible_interval;
        let unit = layout
            .visible_interval_type
            .unwrap_or(DateTimeIntervalType::Days);
        if !interval.is_finite()
            || interval <= 0.0
            || !range.end.is_finite()
            || range.end < range.start
        {
            return LabelSet::default();
        }
        let Some(start_date) = from_oa_date(range.start) else {
            return LabelSet::default();
        };

        let skip_alignment =
            config.edge_labels_visibility == EdgeLabelsVisibilityMode::AlwaysVisible;
        let mut date = if skip_alignment {
            start_date
        } else {
            align_range_start(start_date, interval, unit)
        };
        if let Some(hours) = self.business_hours {
            date = Self::business_start(hours, date, unit).unwrap_or(date);
        }

        let coarser = unit.coarser();
        let step_cap = step_limit(days_to_units(range.delta(), unit), interval).saturating_add(2);
        let mut labels: Vec<AxisLabel> = Vec::new();
        let mut majors = Vec::new();
        let mut previous_position = f64::NAN;
        let mut previous_key = None;
        for _ in 0..step_cap {
            let position = to_oa_date(date);
            majors.push(position);
            if position > range.end + POSITION_TOLERANCE {
                break;
            }
            if position == previous_position {
                warn!(position, interval, "date-time label position stopped advancing");
                break;
            }
            previous_position = position;

            if position >= range.start - POSITION_TOLERANCE {
                let key = coarser.map(|coarser| unit_key(date, coarser));
                let is_transition = labels.is_empty() || key != previous_key;
                previous_key = key;
                let position = position.clamp(range.start, range.end);
                labels.push(self.label(position, date, unit, is_transition));
            }

            let Some(next) = increase_interval(date, interval, unit) else {
                break;
            };
            date = match self.business_hours {
                Some(hours) if !hours.is_open(next) => match hours.clamp_start(next) {
                    Some(open) => open,
                    None => break,
                },
                _ => next,
            };
        }

        if forces_edge_label(
            config.edge_labels_visibility,
            config.maximum,
            range.end,
            layout.is_zoomed,
        ) {
            push_edge_label(&mut labels, range.end, POSITION_TOLERANCE, |end| {
                from_oa_date(end).map(|date| self.label(end, date, unit, false))
            });
        }

        let small_ticks = date_small_ticks(range, &majors, config.small_ticks_per_interval);
        LabelSet {
            labels,
            small_ticks,
        }
    }
}

/// Evenly spaced minor ticks between consecutive calendar majors.
fn date_small_ticks(range: DoubleRange, majors: &[f64], per_interval: u32) -> Vec<f64> {
    if per_interval == 0 {
        return Vec::new();
    }
    let divisions = f64::from(per_interval) + 1.0;
    majors
        .windows(2)
        .flat_map(|pair| {
            let (low, high) = (pair[0], pair[1]);
            (1..=per_interval).map(move |k| low + (high - low) * f64::from(k) / divisions)
        })
        .filter(|tick| range.inside(*tick))
        .collect()
}
