use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axis::AxisLayout;
use crate::axis::config::{AxisConfiguration, EdgeLabelsVisibilityMode};
use crate::core::{DateTimeIntervalType, DoubleRange};

/// Upper bound on major steps in one pass, regardless of range and interval.
pub const MAX_LABEL_STEPS: usize = 100_000;

/// One major tick with its display text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    /// Position in axis units (log units for logarithmic axes).
    pub position: f64,
    pub content: String,
    /// Value the label represents: back-transformed for log axes, OADate for
    /// date-time axes, the index for category axes.
    pub label_value: f64,
    #[serde(default)]
    pub interval_type: Option<DateTimeIntervalType>,
    /// First label of a new coarser date-time unit.
    #[serde(default)]
    pub is_transition: bool,
}

impl AxisLabel {
    #[must_use]
    pub fn new(position: f64, content: String, label_value: f64) -> Self {
        Self {
            position,
            content,
            label_value,
            interval_type: None,
            is_transition: false,
        }
    }
}

/// Labels and small ticks produced by one pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSet {
    pub labels: Vec<AxisLabel>,
    pub small_ticks: Vec<f64>,
}

/// Number of steps a walk over `delta` may take: `ceil(delta / interval) + 2`,
/// capped at [`MAX_LABEL_STEPS`].
#[must_use]
pub fn step_limit(delta: f64, interval: f64) -> usize {
    let steps = (delta / interval).ceil();
    if !steps.is_finite() || steps < 0.0 {
        return 0;
    }
    let limit = (steps as usize).saturating_add(2);
    if limit > MAX_LABEL_STEPS {
        warn!(delta, interval, limit, "label step count capped");
        MAX_LABEL_STEPS
    } else {
        limit
    }
}

/// Major positions `aligned + k * interval` inside `range`.
///
/// Stops past the range end, on a position that fails to advance, or after
/// [`step_limit`] steps.
#[must_use]
pub fn walk_positions(range: DoubleRange, interval: f64, aligned: f64) -> Vec<f64> {
    if !range.start.is_finite()
        || !range.end.is_finite()
        || range.end < range.start
        || !aligned.is_finite()
        || !interval.is_finite()
        || interval <= 0.0
    {
        return Vec::new();
    }
    let tolerance = interval * 1e-9;
    let mut positions = Vec::new();
    let mut previous = f64::NAN;
    for step in 0..step_limit(range.delta(), interval) {
        let position = aligned + step as f64 * interval;
        if position > range.end + tolerance {
            break;
        }
        if position == previous {
            warn!(position, interval, "label position stopped advancing");
            break;
        }
        previous = position;
        if position >= range.start - tolerance {
            positions.push(position.clamp(range.start, range.end));
        }
    }
    positions
}

/// Aligned start for linear stepping: `start - start % interval`.
#[must_use]
pub fn linear_aligned_start(start: f64, interval: f64) -> f64 {
    start - start % interval
}

/// Evenly spaced minor ticks between majors, including the partial interval
/// before the first one.
#[must_use]
pub fn linear_small_ticks(
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
    let spacing = interval / (f64::from(per_interval) + 1.0);
    std::iter::once(first - interval)
        .chain(majors.iter().copied())
        .flat_map(|major| (1..=per_interval).map(move |k| major + spacing * f64::from(k)))
        .filter(|tick| range.inside(*tick))
        .collect()
}

/// Whether a label must be placed at the visible range end.
#[must_use]
pub fn forces_edge_label(
    mode: EdgeLabelsVisibilityMode,
    explicit_end: Option<f64>,
    visible_end: f64,
    is_zoomed: bool,
) -> bool {
    explicit_end.is_some_and(|end| end == visible_end)
        || mode == EdgeLabelsVisibilityMode::AlwaysVisible
        || (mode == EdgeLabelsVisibilityMode::Visible && !is_zoomed)
}

/// Appends `make(end)` unless the last label already sits within `tolerance` of `end`.
pub fn push_edge_label(
    labels: &mut Vec<AxisLabel>,
    end: f64,
    tolerance: f64,
    make: impl FnOnce(f64) -> Option<AxisLabel>,
) {
    let already_labeled = labels
        .last()
        .is_some_and(|label| (label.position - end).abs() <= tolerance);
    if !already_labeled {
        if let Some(label) = make(end) {
            labels.push(label);
        }
    }
}

/// Linear walk shared by numeric, logarithmic and time-span axes.
///
/// `explicit_end` is the configured maximum in visible-range units.
pub(crate) fn linear_labels(
    config: &AxisConfiguration,
    layout: &AxisLayout,
    explicit_end: Option<f64>,
    make: impl Fn(f64) -> AxisLabel,
) -> (Vec<AxisLabel>, Vec<f64>) {
    let range = layout.visible_range;
    let interval = layout.visible_interval;
    let positions = walk_positions(range, interval, linear_aligned_start(range.start, interval));
    let mut labels: Vec<AxisLabel> = positions.iter().map(|position| make(*position)).collect();
    if forces_edge_label(
        config.edge_labels_visibility,
        explicit_end,
        range.end,
        layout.is_zoomed,
    ) && range.end.is_finite()
    {
        push_edge_label(&mut labels, range.end, interval.abs() * 1e-9, |end| {
            Some(make(end))
        });
    }
    (labels, positions)
}

#[cfg(test)]
mod tests {
    use super::{forces_edge_label, linear_small_ticks, step_limit, walk_positions};
    use crate::axis::config::EdgeLabelsVisibilityMode;
    use crate::core::DoubleRange;

    #[test]
    fn walk_aligns_to_interval_multiples() {
        let positions = walk_positions(DoubleRange::new(3.0, 97.0), 20.0, 0.0);
        assert_eq!(positions, vec![20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn walk_stops_when_position_cannot_advance() {
        let positions = walk_positions(DoubleRange::new(1e20, 1e20 + 10.0), 1.0, 1e20);
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn step_limit_covers_partial_intervals() {
        assert_eq!(step_limit(10.0, 3.0), 6);
        assert_eq!(step_limit(f64::NAN, 1.0), 0);
    }

    #[test]
    fn small_ticks_fill_each_interval() {
        let ticks = linear_small_ticks(DoubleRange::new(0.0, 10.0), &[0.0, 5.0, 10.0], 5.0, 4);
        assert_eq!(ticks, vec![1.0, 2.0, 3.0, 4.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn visible_mode_forces_edge_only_when_not_zoomed() {
        let mode = EdgeLabelsVisibilityMode::Visible;
        assert!(forces_edge_label(mode, None, 97.0, false));
        assert!(!forces_edge_label(mode, None, 97.0, true));
        assert!(forces_edge_label(
            EdgeLabelsVisibilityMode::Default,
            Some(97.0),
            97.0,
            true
        ));
    }
}
