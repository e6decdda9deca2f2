use crate::axis::config::{AxisConfiguration, NumericAxisSettings};
use crate::axis::format::DEFAULT_LABEL_DECIMALS;
use crate::axis::labels::{AxisLabel, LabelSet, linear_labels, linear_small_ticks};
use crate::axis::range::{
    AxisStep, ResolvedRange, apply_overrides, pad_numeric, resolve_padding, widen_degenerate,
};
use crate::axis::{AxisInput, AxisLayout, AxisStrategy};
use crate::core::primitives::{format_decimal, round_to_decimals};
use crate::core::range_math::{calculate_nice_interval, explicit_interval};
use crate::core::DoubleRange;

impl NumericAxisSettings {
    /// Natural data range with `start_range_from_zero` and degenerate widening applied.
    #[must_use]
    pub fn natural_range(&self, input: &AxisInput<'_>) -> DoubleRange {
        let mut natural = widen_degenerate(input.natural_extent(), 1.0);
        if self.start_range_from_zero && natural.start > 0.0 {
            natural.start = 0.0;
        }
        natural
    }

    fn label(&self, position: f64) -> AxisLabel {
        let decimals = self.label_decimals.unwrap_or(DEFAULT_LABEL_DECIMALS);
        AxisLabel::new(
            position,
            format_decimal(position, decimals),
            round_to_decimals(position, decimals),
        )
    }
}

impl AxisStrategy for NumericAxisSettings {
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange {
        let explicit = explicit_interval(config.interval);
        let interval_for = |range: DoubleRange| {
            explicit.unwrap_or_else(|| calculate_nice_interval(range, desired))
        };
        let padding =
            resolve_padding(config.range_padding, config.orientation, input.is_transposed());

        apply_overrides(
            config.minimum,
            config.maximum,
            self.natural_range(input),
            &|range| AxisStep::plain(interval_for(range)),
            &|range, step| pad_numeric(range, step.interval, padding, &interval_for),
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
                .unwrap_or_else(|| calculate_nice_interval(visible, desired)),
        )
    }

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        _input: &AxisInput<'_>,
    ) -> LabelSet {
        let (labels, majors) =
            linear_labels(config, layout, config.maximum, |position| self.label(position));
        let small_ticks = linear_small_ticks(
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
