use tracing::trace;

use crate::axis::config::{AxisConfiguration, LogarithmicAxisSettings, RangePadding};
use crate::axis::format::LOG_LABEL_DECIMALS;
use crate::axis::labels::{AxisLabel, LabelSet, linear_labels};
use crate::axis::range::{AxisStep, ResolvedRange, apply_overrides};
use crate::axis::{AxisInput, AxisLayout, AxisStrategy};
use crate::core::DoubleRange;
use crate::core::primitives::{format_decimal, round_to_decimals};
use crate::core::range_math::{
    calculate_log_nice_interval, explicit_interval, log_base, log_or_raw, log_transform,
};

impl LogarithmicAxisSettings {
    /// Natural data range in linear units with a strictly positive start.
    ///
    /// A non-positive minimum becomes the smallest positive sample when that
    /// lies in `(0, 1)`, otherwise `1`.
    #[must_use]
    pub fn linear_natural_range(&self, input: &AxisInput<'_>) -> DoubleRange {
        let extent = input.natural_extent();
        if extent.is_empty() {
            return DoubleRange::new(1.0, self.base);
        }
        let start = if extent.start > 0.0 {
            extent.start
        } else {
            let substitute = input
                .min_positive_value()
                .filter(|value| *value < 1.0)
                .unwrap_or(1.0);
            trace!(start = extent.start, substitute, "substituted non-positive log minimum");
            substitute
        };
        DoubleRange::new(start, extent.end.max(start))
    }

    /// Natural range in whole log units, never zero-width.
    #[must_use]
    pub fn natural_range(&self, input: &AxisInput<'_>) -> DoubleRange {
        let log_range = log_transform(self.linear_natural_range(input), self.base);
        if log_range.delta() > 0.0 {
            log_range
        } else {
            DoubleRange::new(log_range.start, log_range.start + 1.0)
        }
    }

    fn label(&self, position: f64) -> AxisLabel {
        let value = self.base.powf(position);
        AxisLabel::new(
            position,
            format_decimal(value, LOG_LABEL_DECIMALS),
            round_to_decimals(value, LOG_LABEL_DECIMALS),
        )
    }

    /// Minor ticks at the logs of evenly spaced linear values between majors.
    fn small_ticks(
        &self,
        range: DoubleRange,
        majors: &[f64],
        interval: f64,
        per_interval: u32,
    ) -> Vec<f64> {
        let Some(first) = majors.first() else {
            return Vec::new();
        };
        if per_interval == 0 {
            return Vec::new();
        }
        let divisions = f64::from(per_interval) + 1.0;
        std::iter::once(first - interval)
            .chain(majors.iter().copied())
            .flat_map(|major| {
                let low = self.base.powf(major);
                let high = self.base.powf(major + interval);
                (1..=per_interval).map(move |k| low + (high - low) * f64::from(k) / divisions)
            })
            .map(|value| log_base(value, self.base))
            .filter(|tick| range.inside(*tick))
            .collect()
    }
}

impl AxisStrategy for LogarithmicAxisSettings {
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange {
        let explicit = explicit_interval(config.interval);
        let step_for = |range: DoubleRange| {
            AxisStep::plain(
                explicit.unwrap_or_else(|| calculate_log_nice_interval(range, desired)),
            )
        };
        // Log ranges already sit on whole units; only `Additional` widens them.
        let additional = config.range_padding == RangePadding::Additional;

        apply_overrides(
            config.minimum.map(|minimum| log_or_raw(minimum, self.base)),
            config.maximum.map(|maximum| log_or_raw(maximum, self.base)),
            self.natural_range(input),
            &step_for,
            &|range, step| {
                if additional {
                    ResolvedRange::new(
                        DoubleRange::new(range.start - step.interval, range.end + step.interval),
                        step,
                    )
                } else {
                    ResolvedRange::new(range, step)
                }
            },
        )
    }

    fn visible_step(
        &self,
        config: &AxisConfiguration,
        visible: DoubleRange,
        desired: f64,
    ) -> AxisStep {
        AxisStep::plain(
            explicit_interval(config.interval)
                .unwrap_or_else(|| calculate_log_nice_interval(visible, desired)),
        )
    }

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        _input: &AxisInput<'_>,
    ) -> LabelSet {
        let explicit_end = config.maximum.map(|maximum| log_or_raw(maximum, self.base));
        let (labels, majors) =
            linear_labels(config, layout, explicit_end, |position| self.label(position));
        let small_ticks = self.small_ticks(
            layout.visible_range,
            &majors,
            layout.visible_interval,
            config.small_ticks_per_interval,
        );
        LabelSet {
            labels,
            small_ticks,
        }
    }
}
