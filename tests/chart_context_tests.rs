use chart_axes::axis::{
    AggregateFunction, AxisConfiguration, AxisKind, CategoryAxisSettings, RangePadding,
};
use chart_axes::core::{DoubleRange, Orientation, SeriesKind, SeriesValueView, XValues};
use chart_axes::trendline::{TrendlineChange, TrendlineConfig, TrendlineType};
use chart_axes::{AxisId, ChartContext, ChartError, NullHost, SeriesId};

fn line(x_values: Vec<f64>, y_values: Vec<f64>) -> SeriesValueView {
    SeriesValueView::xy(SeriesKind::Line, x_values, y_values)
}

fn value_axis() -> AxisConfiguration {
    AxisConfiguration::numeric().with_orientation(Orientation::Vertical)
}

fn numeric_chart() -> (ChartContext<NullHost>, AxisId, AxisId, SeriesId) {
    let mut chart = ChartContext::new(NullHost::default());
    let x_axis = chart.add_axis(AxisConfiguration::numeric()).expect("x axis");
    let y_axis = chart.add_axis(value_axis()).expect("y axis");
    let series = chart
        .add_series(
            line(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]),
            x_axis,
            y_axis,
        )
        .expect("series");
    (chart, x_axis, y_axis, series)
}

#[test]
fn mutations_mark_dirty_and_request_redraws() {
    let (mut chart, x_axis, _, _) = numeric_chart();
    assert!(chart.is_dirty());
    assert_eq!(chart.host().redraw_requests, 3);
    assert!(chart.axis_layout(x_axis).expect("known axis").is_none());

    chart.recompute().expect("recompute");

    assert!(!chart.is_dirty());
    assert_eq!(chart.pass_count(), 1);
    assert_eq!(chart.host().redraw_requests, 3);
    assert!(chart.axis_layout(x_axis).expect("known axis").is_some());

    let same = chart.axis_config(x_axis).expect("known axis").clone();
    chart.set_axis_config(x_axis, same).expect("same config");
    assert!(!chart.is_dirty());
    assert_eq!(chart.host().redraw_requests, 3);
}

#[test]
fn interval_change_requests_one_more_redraw() {
    let (mut chart, x_axis, _, series) = numeric_chart();
    chart.recompute().expect("first pass");
    let before_interval = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .map(|layout| layout.actual_interval);
    let before = chart.host().redraw_requests;

    chart
        .set_series_data(series, line(vec![0.0, 1000.0], vec![1.0, 2.0]))
        .expect("new data");
    chart.recompute().expect("second pass");

    let after_interval = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .map(|layout| layout.actual_interval);
    assert_ne!(before_interval, after_interval);
    assert_eq!(chart.host().redraw_requests, before + 2);

    chart.recompute().expect("stable pass");
    assert_eq!(chart.host().redraw_requests, before + 2);
}

#[test]
fn unknown_ids_and_invalid_data_are_reported() {
    let (mut chart, x_axis, y_axis, series) = numeric_chart();

    let missing_axis = AxisId::new(99);
    assert!(matches!(
        chart.add_series(line(vec![1.0], vec![1.0]), missing_axis, y_axis),
        Err(ChartError::UnknownAxis(99))
    ));
    assert!(matches!(
        chart.add_series(line(vec![1.0, 2.0], vec![1.0]), x_axis, y_axis),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        chart.set_axis_config(missing_axis, AxisConfiguration::numeric()),
        Err(ChartError::UnknownAxis(99))
    ));
    assert!(matches!(
        chart.remove_series(SeriesId::new(42)),
        Err(ChartError::UnknownSeries(42))
    ));
    assert!(
        chart
            .add_axis(AxisConfiguration::numeric().with_zoom(2.0, 0.0))
            .is_err()
    );
    assert!(
        chart
            .add_trendline(
                series,
                TrendlineConfig::new(TrendlineType::Polynomial).with_polynomial_order(9),
            )
            .is_err()
    );
}

#[test]
fn zoom_updates_visible_window() {
    let (mut chart, x_axis, _, _) = numeric_chart();
    chart
        .set_axis_config(
            x_axis,
            AxisConfiguration::numeric()
                .with_minimum(Some(0.0))
                .with_maximum(Some(100.0)),
        )
        .expect("bounds");
    chart.set_zoom(x_axis, 0.5, 0.5).expect("zoom");
    chart.recompute().expect("recompute");

    let layout = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .expect("layout");
    assert!(layout.is_zoomed);
    assert_eq!(layout.visible_range, DoubleRange::new(50.0, 100.0));
}

#[test]
fn grouped_category_axis_aggregates_value_axis_input() {
    let mut chart = ChartContext::new(NullHost::default());
    let x_axis = chart
        .add_axis(AxisConfiguration::new(AxisKind::Category(
            CategoryAxisSettings {
                is_indexed: false,
                aggregate_function: AggregateFunction::Sum,
                ..CategoryAxisSettings::default()
            },
        )))
        .expect("category axis");
    let y_axis = chart
        .add_axis(
            value_axis()
                .with_range_padding(RangePadding::None)
                .with_desired_intervals_count(Some(3.0)),
        )
        .expect("value axis");
    let keys = |values: &[&str]| XValues::String(values.iter().map(|v| (*v).to_owned()).collect());
    chart
        .add_series(
            SeriesValueView::new(
                SeriesKind::Column,
                keys(&["a", "b", "a"]),
                vec![vec![1.0, 2.0, 3.0]],
            ),
            x_axis,
            y_axis,
        )
        .expect("first series");
    chart
        .add_series(
            SeriesValueView::new(SeriesKind::Column, keys(&["b", "c"]), vec![vec![4.0, 5.0]]),
            x_axis,
            y_axis,
        )
        .expect("second series");

    chart.recompute().expect("recompute");

    let grouping = chart
        .grouping(x_axis)
        .expect("known axis")
        .expect("grouping");
    assert_eq!(grouping.distinct_x_values, vec!["a", "b", "c"]);
    let x_layout = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .expect("layout");
    assert_eq!(x_layout.actual_range, DoubleRange::new(0.0, 2.0));
    let texts: Vec<&str> = x_layout
        .labels
        .iter()
        .map(|label| label.content.as_str())
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
    let y_layout = chart
        .axis_layout(y_axis)
        .expect("known axis")
        .expect("layout");
    assert_eq!(y_layout.actual_range, DoubleRange::new(2.0, 5.0));

    let snapshot = chart.snapshot();
    assert_eq!(
        snapshot.axes[0].distinct_x_values,
        Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
    );
    assert_eq!(snapshot.axes[1].distinct_x_values, None);
}

#[test]
fn stroke_changes_keep_the_fit() {
    let (mut chart, _, _, series) = numeric_chart();
    let trendline = chart
        .add_trendline(series, TrendlineConfig::new(TrendlineType::Linear))
        .expect("trendline");
    chart.recompute().expect("first pass");
    let fitted = chart.trendline_fit(trendline).expect("fit").clone();
    assert!(fitted.coefficients.is_some());

    let restyled = TrendlineConfig::new(TrendlineType::Linear).with_stroke(Some("red".into()), 2.0);
    let change = chart
        .set_trendline_config(trendline, restyled.clone())
        .expect("restyle");
    assert_eq!(change, TrendlineChange::Visual);
    assert_eq!(chart.trendline_visual_revision(trendline).expect("known"), 1);
    chart.recompute().expect("second pass");
    assert_eq!(chart.trendline_fit(trendline).expect("fit"), &fitted);

    let unchanged = chart
        .set_trendline_config(trendline, restyled.clone())
        .expect("same config");
    assert_eq!(unchanged, TrendlineChange::Unchanged);
    assert!(!chart.is_dirty());

    let change = chart
        .set_trendline_config(trendline, restyled.with_forecast(0.0, 2.0))
        .expect("forecast");
    assert_eq!(change, TrendlineChange::Refit);
    chart.recompute().expect("third pass");
    assert_eq!(
        chart.trendline_fit(trendline).expect("fit").domain,
        DoubleRange::new(1.0, 5.0)
    );
}

#[test]
fn removing_a_series_drops_its_trendlines() {
    let (mut chart, _, _, series) = numeric_chart();
    let trendline = chart
        .add_trendline(series, TrendlineConfig::new(TrendlineType::Linear))
        .expect("trendline");

    chart.remove_series(series).expect("remove");

    assert!(matches!(
        chart.trendline_fit(trendline),
        Err(ChartError::UnknownTrendline(_))
    ));
    assert_eq!(chart.trendline_ids().count(), 0);
    assert_eq!(chart.series_ids().count(), 0);
    chart.recompute().expect("recompute");
}

#[test]
fn hidden_series_clear_their_trendline() {
    let (mut chart, x_axis, _, series) = numeric_chart();
    let trendline = chart
        .add_trendline(series, TrendlineConfig::new(TrendlineType::Linear))
        .expect("trendline");
    chart.recompute().expect("first pass");

    chart.set_series_visible(series, false).expect("hide");
    chart.recompute().expect("second pass");

    let fit = chart.trendline_fit(trendline).expect("fit");
    assert!(fit.coefficients.is_none());
    assert!(fit.segments.is_empty());
    let layout = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .expect("layout");
    assert_eq!(layout.actual_range, DoubleRange::new(0.0, 1.0));

    chart.set_series_visible(series, true).expect("show");
    chart.recompute().expect("third pass");
    assert!(chart.trendline_fit(trendline).expect("fit").coefficients.is_some());
}

#[test]
fn automatic_date_axis_changes_refresh_forecast_only() {
    let mut chart = ChartContext::new(NullHost::default());
    let x_axis = chart
        .add_axis(AxisConfiguration::date_time())
        .expect("date axis");
    let y_axis = chart.add_axis(value_axis()).expect("value axis");
    // 2024-01-01 through 2024-02-10, every ten days.
    let x_values: Vec<f64> = (0..5).map(|step| 45_292.0 + 10.0 * f64::from(step)).collect();
    let series = chart
        .add_series(
            SeriesValueView::new(
                SeriesKind::Line,
                XValues::DateTime(x_values),
                vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]],
            ),
            x_axis,
            y_axis,
        )
        .expect("series");
    let trendline = chart
        .add_trendline(
            series,
            TrendlineConfig::new(TrendlineType::Linear).with_forecast(0.0, 1.0),
        )
        .expect("trendline");

    chart.recompute().expect("first pass");
    let first = chart.trendline_fit(trendline).expect("fit").clone();
    assert_eq!(first.domain.end, 45_333.0);

    let widened = chart
        .axis_config(x_axis)
        .expect("known axis")
        .clone()
        .with_maximum(Some(45_732.0));
    chart.set_axis_config(x_axis, widened).expect("widen");
    chart.recompute().expect("second pass");

    let layout = chart
        .axis_layout(x_axis)
        .expect("known axis")
        .expect("layout");
    assert_eq!(
        layout.actual_interval_type,
        Some(chart_axes::core::DateTimeIntervalType::Months)
    );
    let refreshed = chart.trendline_fit(trendline).expect("fit");
    assert_eq!(refreshed.coefficients, first.coefficients);
    // 2024-02-10 plus one month.
    assert_eq!(refreshed.domain.end, 45_361.0);
}
