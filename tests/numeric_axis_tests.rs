use chart_axes::ChartError;
use chart_axes::axis::{
    AxisConfiguration, AxisInput, AxisKind, AxisRole, EdgeLabelsVisibilityMode,
    MAX_SMALL_TICKS_PER_INTERVAL, NumericAxisSettings, RangePadding, compute_axis_layout,
};
use chart_axes::core::{DoubleRange, Orientation, SeriesKind, SeriesValueView, Size};

fn series(x_values: Vec<f64>) -> SeriesValueView {
    let y_values = x_values.iter().map(|x| x * 2.0).collect();
    SeriesValueView::xy(SeriesKind::Line, x_values, y_values)
}

fn input(series: &SeriesValueView) -> AxisInput<'_> {
    AxisInput::new(AxisRole::X, vec![series], Size::new(800.0, 600.0))
}

fn label_texts(config: &AxisConfiguration, data: &SeriesValueView) -> Vec<String> {
    compute_axis_layout(config, &input(data))
        .expect("layout")
        .labels
        .into_iter()
        .map(|label| label.content)
        .collect()
}

#[test]
fn round_padding_snaps_to_interval_multiples() {
    let data = series(vec![3.0, 50.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::Round)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_interval, 20.0);
    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 100.0));
    assert_eq!(layout.visible_range, layout.actual_range);
    assert!(!layout.is_zoomed);
    let texts: Vec<&str> = layout
        .labels
        .iter()
        .map(|label| label.content.as_str())
        .collect();
    assert_eq!(texts, vec!["0", "20", "40", "60", "80", "100"]);
}

#[test]
fn auto_padding_keeps_horizontal_data_envelope() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric().with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(3.0, 97.0));
    assert_eq!(label_texts(&config, &data), vec!["20", "40", "60", "80"]);
}

#[test]
fn auto_padding_rounds_vertical_axis() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_orientation(Orientation::Vertical)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 100.0));
}

#[test]
fn visible_edge_mode_labels_range_end() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_desired_intervals_count(Some(5.0))
        .with_edge_labels_visibility(EdgeLabelsVisibilityMode::Visible);

    assert_eq!(
        label_texts(&config, &data),
        vec!["20", "40", "60", "80", "97"]
    );
}

#[test]
fn full_width_zoom_keeps_visible_edge_label() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_desired_intervals_count(Some(5.0))
        .with_edge_labels_visibility(EdgeLabelsVisibilityMode::Visible)
        .with_zoom(1.0, 0.4);

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert!(!layout.is_zoomed);
    assert_eq!(layout.visible_range, layout.actual_range);
    assert_eq!(
        label_texts(&config, &data),
        vec!["20", "40", "60", "80", "97"]
    );
}

#[test]
fn explicit_bounds_are_used_verbatim() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_minimum(Some(0.0))
        .with_maximum(Some(50.0))
        .with_range_padding(RangePadding::Additional)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 50.0));
    assert_eq!(layout.actual_interval, 10.0);
    assert_eq!(layout.labels.len(), 6);
    assert_eq!(
        layout.labels.last().map(|label| label.position),
        Some(50.0)
    );
}

#[test]
fn single_bound_is_restored_after_padding() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_minimum(Some(10.0))
        .with_range_padding(RangePadding::Round)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range.start, 10.0);
    assert_eq!(layout.actual_range.end, 100.0);
}

#[test]
fn explicit_interval_overrides_nice_interval() {
    let data = series(vec![0.0, 10.0]);
    let config = AxisConfiguration::numeric()
        .with_interval(Some(2.5))
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_interval, 2.5);
    assert_eq!(
        label_texts(&config, &data),
        vec!["0", "2.5", "5", "7.5", "10"]
    );
}

#[test]
fn normal_padding_adds_headroom_from_zero() {
    let data = series(vec![10.0, 90.0]);
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::Normal)
        .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 125.0));
    assert_eq!(layout.actual_interval, 25.0);
}

#[test]
fn start_range_from_zero_moves_positive_start() {
    let data = series(vec![40.0, 90.0]);
    let config = AxisConfiguration::new(AxisKind::Numeric(NumericAxisSettings {
        start_range_from_zero: true,
        label_decimals: None,
    }))
    .with_desired_intervals_count(Some(5.0));

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 90.0));
    assert_eq!(layout.actual_interval, 20.0);
}

#[test]
fn degenerate_data_widens_to_unit_range() {
    let single = series(vec![5.0, 5.0]);
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::None)
        .with_desired_intervals_count(Some(5.0));
    let layout = compute_axis_layout(&config, &input(&single)).expect("layout");
    assert_eq!(layout.actual_range, DoubleRange::new(5.0, 6.0));

    let empty = series(Vec::new());
    let layout = compute_axis_layout(&config, &input(&empty)).expect("layout");
    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 1.0));

    let missing = series(vec![f64::NAN, f64::INFINITY]);
    let layout = compute_axis_layout(&config, &input(&missing)).expect("layout");
    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 1.0));
}

#[test]
fn hidden_series_do_not_contribute() {
    let visible = series(vec![0.0, 10.0]);
    let hidden = series(vec![-500.0, 500.0]).with_visible(false);
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::None)
        .with_desired_intervals_count(Some(5.0));
    let axis_input = AxisInput::new(AxisRole::X, vec![&visible, &hidden], Size::new(800.0, 600.0));

    let layout = compute_axis_layout(&config, &axis_input).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 10.0));
}

#[test]
fn y_role_measures_every_value_sequence() {
    let data = SeriesValueView::new(
        SeriesKind::HiLo,
        chart_axes::core::XValues::Double(vec![0.0, 1.0]),
        vec![vec![12.0, 18.0], vec![4.0, 9.0]],
    );
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::None)
        .with_desired_intervals_count(Some(5.0));
    let axis_input = AxisInput::new(AxisRole::Y, vec![&data], Size::new(800.0, 600.0));

    let layout = compute_axis_layout(&config, &axis_input).expect("layout");

    assert_eq!(layout.actual_range, DoubleRange::new(4.0, 18.0));
}

#[test]
fn zoomed_window_gets_its_own_interval() {
    let data = series(vec![0.0, 100.0]);
    let config = AxisConfiguration::numeric()
        .with_minimum(Some(0.0))
        .with_maximum(Some(100.0))
        .with_desired_intervals_count(Some(5.0))
        .with_zoom(0.5, 0.25);

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert!(layout.is_zoomed);
    assert_eq!(layout.actual_interval, 20.0);
    assert_eq!(layout.visible_range, DoubleRange::new(25.0, 75.0));
    assert_eq!(layout.visible_interval, 10.0);
    assert_eq!(layout.labels.first().map(|label| label.position), Some(30.0));

    let fixed = config.with_auto_interval_on_zooming(false);
    let layout = compute_axis_layout(&fixed, &input(&data)).expect("layout");
    assert_eq!(layout.visible_interval, 20.0);
}

#[test]
fn small_ticks_fill_between_majors() {
    let data = series(vec![3.0, 97.0]);
    let config = AxisConfiguration::numeric()
        .with_range_padding(RangePadding::Round)
        .with_desired_intervals_count(Some(5.0))
        .with_small_ticks_per_interval(1);

    let layout = compute_axis_layout(&config, &input(&data)).expect("layout");

    assert_eq!(layout.small_ticks, vec![10.0, 30.0, 50.0, 70.0, 90.0]);
}

#[test]
fn label_decimals_round_label_text() {
    let data = series(vec![0.0, 1.0]);
    let config = AxisConfiguration::new(AxisKind::Numeric(NumericAxisSettings {
        start_range_from_zero: false,
        label_decimals: Some(1),
    }))
    .with_interval(Some(0.25))
    .with_desired_intervals_count(Some(5.0));

    assert_eq!(
        label_texts(&config, &data),
        vec!["0", "0.2", "0.5", "0.8", "1"]
    );
}

#[test]
fn invalid_configuration_is_rejected() {
    let data = series(vec![0.0, 1.0]);
    let inverted = AxisConfiguration::numeric()
        .with_minimum(Some(5.0))
        .with_maximum(Some(1.0));
    assert!(compute_axis_layout(&inverted, &input(&data)).is_err());

    let zoom = AxisConfiguration::numeric().with_zoom(0.0, 0.0);
    assert!(compute_axis_layout(&zoom, &input(&data)).is_err());

    let interval = AxisConfiguration::numeric().with_interval(Some(-1.0));
    assert!(compute_axis_layout(&interval, &input(&data)).is_err());
}

#[test]
fn oversized_small_tick_count_is_rejected() {
    let data = series(vec![0.0, 10.0]);
    let config = AxisConfiguration::numeric().with_small_ticks_per_interval(u32::MAX);

    assert!(matches!(config.validate(), Err(ChartError::InvalidData(_))));
    assert!(compute_axis_layout(&config, &input(&data)).is_err());

    let capped = AxisConfiguration::numeric()
        .with_desired_intervals_count(Some(5.0))
        .with_small_ticks_per_interval(MAX_SMALL_TICKS_PER_INTERVAL);
    assert!(capped.validate().is_ok());
    let layout = compute_axis_layout(&capped, &input(&data)).expect("layout");
    assert!(layout.small_ticks.len() <= 101 * (layout.labels.len() + 1));
}
