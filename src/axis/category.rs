use crate::axis::config::{AxisConfiguration, CategoryAxisSettings, LabelPlacement, RangePadding};
use crate::axis::format::format_x_value;
use crate::axis::labels::{AxisLabel, LabelSet, linear_small_ticks, walk_positions};
use crate::axis::range::{AxisStep, ResolvedRange, apply_overrides, pad_numeric, resolve_padding};
use crate::axis::{AxisInput, AxisLayout, AxisStrategy};
use crate::core::range_math::{calculate_nice_interval, explicit_interval};
use crate::core::{DoubleRange, SeriesValueView};

/// Category steps are whole slots.
fn category_interval(range: DoubleRange, desired: f64) -> f64 {
    calculate_nice_interval(range, desired).floor().max(1.0)
}

impl CategoryAxisSettings {
    /// Whether labels read the raw per-point X values instead of distinct ones.
    ///
    /// Series kinds that never group force indexing regardless of the setting.
    #[must_use]
    pub fn is_indexed_for(&self, input: &AxisInput<'_>) -> bool {
        self.is_indexed
            || input.grouping.is_none()
            || input
                .visible_series()
                .any(|series| series.kind.is_always_indexed())
    }

    /// Index range `[0, slots - 1]`; `[0, 1]` without data.
    #[must_use]
    pub fn natural_range(&self, input: &AxisInput<'_>) -> DoubleRange {
        let slots = if self.is_indexed_for(input) {
            input.max_data_count()
        } else {
            input
                .grouping
                .map_or(0, |grouping| grouping.distinct_x_values.len())
        };
        match slots {
            0 => DoubleRange::new(0.0, 1.0),
            slots => DoubleRange::new(0.0, (slots - 1) as f64),
        }
    }

    /// Label text for slot `index`: custom override, then the raw or distinct
    /// X value depending on indexing, then the other source.
    #[must_use]
    pub fn label_content(&self, index: usize, indexed: bool, input: &AxisInput<'_>) -> String {
        if let Some(custom) = self.custom_labels.iter().find(|label| label.index == index) {
            return custom.text.clone();
        }
        let raw = || {
            reference_series(input).and_then(|series| format_x_value(&series.x_values, index))
        };
        let distinct = || {
            input
                .grouping
                .and_then(|grouping| grouping.distinct_x_values.get(index).cloned())
        };
        let resolved = if indexed {
            raw().or_else(distinct)
        } else {
            distinct().or_else(raw)
        };
        resolved.unwrap_or_else(|| index.to_string())
    }
}

/// Visible series with the most points; the first one wins ties.
fn reference_series<'a>(input: &AxisInput<'a>) -> Option<&'a SeriesValueView> {
    input
        .visible_series()
        .fold(None, |best: Option<&'a SeriesValueView>, series| match best {
            Some(best) if best.data_count() >= series.data_count() => Some(best),
            _ => Some(series),
        })
}

impl AxisStrategy for CategoryAxisSettings {
    fn actual_range(
        &self,
        config: &AxisConfiguration,
        input: &AxisInput<'_>,
        desired: f64,
    ) -> ResolvedRange {
        let explicit = explicit_interval(config.interval);
        let interval_for =
            |range: DoubleRange| explicit.unwrap_or_else(|| category_interval(range, desired));
        let padding =
            match resolve_padding(config.range_padding, config.orientation, input.is_transposed()) {
                RangePadding::Normal => RangePadding::Round,
                other => other,
            };

        let resolved = apply_overrides(
            config.minimum,
            config.maximum,
            self.natural_range(input),
            &|range| AxisStep::plain(interval_for(range)),
            &|range, step| pad_numeric(range, step.interval, padding, &interval_for),
        );

        let is_polar = input
            .visible_series()
            .any(|series| series.kind.is_polar_radar());
        let between_ticks = self.label_placement == LabelPlacement::BetweenTicks && !is_polar;
        if between_ticks || resolved.range.delta() == 0.0 {
            let range = DoubleRange::new(resolved.range.start - 0.5, resolved.range.end + 0.5);
            return ResolvedRange::new(range, resolved.step);
        }
        resolved
    }

    fn visible_step(
        &self,
        config: &AxisConfiguration,
        visible: DoubleRange,
        desired: f64,
    ) -> AxisStep {
        AxisStep::plain(
            explicit_interval(config.interval)
                .unwrap_or_else(|| category_interval(visible, desired)),
        )
    }

    fn labels(
        &self,
        config: &AxisConfiguration,
        layout: &AxisLayout,
        input: &AxisInput<'_>,
    ) -> LabelSet {
        let range = layout.visible_range;
        let interval = layout.visible_interval;
        let indexed = self.is_indexed_for(input);
        let positions = walk_positions(range, interval, range.start.ceil());
        let labels = positions
            .iter()
            .filter_map(|position| {
                let index = position.round();
                (index >= 0.0).then(|| {
                    AxisLabel::new(
                        *position,
                        self.label_content(index as usize, indexed, input),
                        index,
                    )
                })
            })
            .collect();
        let small_ticks =
            linear_small_ticks(range, &positions, interval, config.small_ticks_per_interval);
        LabelSet {
            labels,
            small_ticks,
        }
    }
}
