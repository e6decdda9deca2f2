use chart_axes::axis::{
    AxisConfiguration, AxisInput, AxisKind, AxisRole, LogarithmicAxisSettings, RangePadding,
    compute_axis_layout,
};
use chart_axes::core::{DoubleRange, SeriesKind, SeriesValueView, Size};

fn input(series: &SeriesValueView) -> AxisInput<'_> {
    AxisInput::new(AxisRole::Y, vec![series], Size::new(800.0, 600.0))
}

fn values(y_values: Vec<f64>) -> SeriesValueView {
    let x_values = (0..y_values.len()).map(|index| index as f64).collect();
    SeriesValueView::xy(SeriesKind::Line, x_values, y_values)
}

#[test]
fn decades_become_whole_log_units() {
    let data = values(vec![1.0, 35.0, 1000.0]);
    let config = AxisConfiguration::logarithmic(10.0).with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 3.0));
    assert_eq!(layout.actual_interval, 1.0);
    let texts: Vec<&str> = layout
        .labels
        .iter()
        .map(|label| label.content.as_str())
        .collect();
    assert_eq!(texts, vec!["1", "10", "100", "1000"]);
    let values: Vec<f64> = layout.labels.iter().map(|label| label.label_value).collect();
    assert_eq!(values, vec![1.0, 10.0, 100.0, 1000.0]);
}

#[test]
fn non_positive_minimum_starts_at_one() {
    let data = values(vec![0.0, -3.0, 10.0, 100.0]);
    let config = AxisConfiguration::logarithmic(10.0).with_desired_intervals_count(Some(5.0));
    let axis_input = input(&data);

    let settings = LogarithmicAxisSettings { base: 10.0 };
    assert_eq!(
        settings.linear_natural_range(&axis_input),
        DoubleRange::new(1.0, 100.0)
    );
    let layout = compute_axis_layout(&config, &axis_input).expect("layout");
    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 2.0));
}

#[test]
fn small_positive_sample_replaces_non_positive_minimum() {
    let data = values(vec![-1.0, 0.01, 5.0]);
    let settings = LogarithmicAxisSettings { base: 10.0 };
    let axis_input = input(&data);

    assert_eq!(
        settings.linear_natural_range(&axis_input),
        DoubleRange::new(0.01, 5.0)
    );
    assert_eq!(
        settings.natural_range(&axis_input),
        DoubleRange::new(-2.0, 1.0)
    );
}

#[test]
fn empty_data_spans_one_base() {
    let data = values(Vec::new());
    let config = AxisConfiguration::logarithmic(2.0).with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 1.0));
}

#[test]
fn explicit_bounds_are_taken_in_log_units() {
    let data = values(vec![3.0, 40.0]);
    let config = AxisConfiguration::logarithmic(10.0)
        .with_minimum(Some(1.0))
        .with_maximum(Some(10_000.0))
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 4.0));
    assert_eq!(layout.labels.last().map(|label| label.label_value), Some(10_000.0));
}

#[test]
fn additional_padding_adds_a_decade_each_side() {
    let data = values(vec![1.0, 100.0]);
    let config = AxisConfiguration::logarithmic(10.0)
        .with_range_padding(RangePadding::Additional)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(-1.0, 3.0));
}

#[test]
fn small_ticks_follow_linear_subdivisions() {
    let data = values(vec![1.0, 100.0]);
    let config = AxisConfiguration::logarithmic(10.0)
        .with_desired_intervals_count(Some(5.0))
        .with_small_ticks_per_interval(1);

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.small_ticks.len(), 2);
    assert!((layout.small_ticks[0] - 5.5_f64.log10()).abs() <= 1e-12);
    assert!((layout.small_ticks[1] - 55.0_f64.log10()).abs() <= 1e-12);
}

#[test]
fn invalid_base_and_bounds_are_rejected() {
    let data = values(vec![1.0, 10.0]);
    let base_one = AxisConfiguration::new(AxisKind::Logarithmic(LogarithmicAxisSettings {
        base: 1.0,
    }));
    assert!(compute_axis_layout(&base_one, &input(&data)).is_err());

    let negative_minimum = AxisConfiguration::logarithmic(10.0).with_minimum(Some(-1.0));
    assert!(compute_axis_layout(&negative_minimum, &input(&data)).is_err());
}
