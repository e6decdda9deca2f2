use crate::axis::config::{AxisConfiguration, TimeSpanAxisSettings};
use crate::axis::labels::{AxisLabel, LabelSet, linear_labels, linear_small_ticks};
use crate::axis::range::{
    AxisStep, ResolvedRange, apply_overrides, pad_numeric, resolve_padding, widen_degenerate,
};
use crate::axis::{AxisInput, AxisLayout, AxisStrategy};
use crate::core::range_math::{calculate_nice_interval, explicit_interval};
use crate::core::{DoubleRange, format_time_span, parse_time_span};

impl TimeSpanAxisSettings {
    /// Explicit interval in milliseconds: the time-span text when it parses to
    /// a positive span, the numeric interval otherwise.
    #[must_use]
    pub fn explicit_interval_millis(&self, config: &AxisConfiguration) -> Option<f64> {
        let parsed = self
            .interval
            .as_deref()
            .and_then(|text| parse_time_span(text).ok());
        explicit_interval(parsed).or_else(|| explicit_interval(config.interval))
    }
}

impl AxisStrategy for TimeSpanAxisSettings {
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange {
        let explicit = self.explicit_interval_millis(config);
        let interval_for = |range: DoubleRange| {
            explicit.unwrap_or_else(|| calculate_nice_interval(range, desired))
        };
        let padding =
            resolve_padding(config.range_padding, config.orientation, input.is_transposed());

        apply_overrides(
            config.minimum,
            config.maximum,
            widen_degenerate(input.natural_extent(), 1.0),
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
            self.explicit_interval_millis(config)
                .unwrap_or_else(|| calculate_nice_interval(visible, desired)),
        )
    }

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        _input: &AxisInput<'_>,
    ) -> LabelSet {
        let (labels, majors) = linear_labels(config, layout, config.maximum, |position| {
            AxisLabel::new(position, format_time_span(position), position)
        });
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
