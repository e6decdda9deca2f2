use chart_axes::axis::{AxisConfiguration, AxisInput, AxisRole, compute_axis_layout};
use chart_axes::core::{DoubleRange, SeriesKind, SeriesValueView, Size, calculate_nice_interval};
use chart_axes::trendline::{
    TrendlineAxis, TrendlineConfig, TrendlineSource, TrendlineType, fit_trendline,
};
use chart_axes::{ChartContext, NullHost};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_series(points: usize) -> SeriesValueView {
    let x_values: Vec<f64> = (0..points).map(|i| i as f64).collect();
    let y_values: Vec<f64> = x_values
        .iter()
        .map(|x| 100.0 + x * 0.05 + if (*x as usize) % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    SeriesValueView::xy(SeriesKind::Line, x_values, y_values)
}

fn bench_nice_interval(c: &mut Criterion) {
    c.bench_function("nice_interval", |b| {
        b.iter(|| {
            let _ = calculate_nice_interval(
                black_box(DoubleRange::new(3.0, 97_531.0)),
                black_box(12.96),
            );
        })
    });
}

fn bench_numeric_labels_10k(c: &mut Criterion) {
    let series = generated_series(10_000);
    let config = AxisConfiguration::numeric()
        .with_minimum(Some(0.0))
        .with_maximum(Some(10_000.0))
        .with_interval(Some(1.0));
    let input = AxisInput::new(AxisRole::X, vec![&series], Size::new(1920.0, 1080.0));

    c.bench_function("numeric_labels_10k", |b| {
        b.iter(|| {
            let _ = compute_axis_layout(black_box(&config), black_box(&input))
                .expect("layout should succeed");
        })
    });
}

fn bench_polynomial_fit_10k(c: &mut Criterion) {
    let series = generated_series(10_000);
    let source = TrendlineSource::from_series(&series, TrendlineAxis::Numeric);
    let config = TrendlineConfig::new(TrendlineType::Polynomial).with_polynomial_order(4);

    c.bench_function("polynomial_fit_10k", |b| {
        b.iter(|| {
            let _ = fit_trendline(black_box(&config), black_box(&source));
        })
    });
}

fn bench_context_recompute_2k(c: &mut Criterion) {
    let mut chart = ChartContext::new(NullHost::default());
    let x_axis = chart
        .add_axis(AxisConfiguration::numeric())
        .expect("valid x axis");
    let y_axis = chart
        .add_axis(AxisConfiguration::numeric())
        .expect("valid y axis");
    let series = chart
        .add_series(generated_series(2_000), x_axis, y_axis)
        .expect("valid series");
    chart
        .add_trendline(series, TrendlineConfig::new(TrendlineType::Exponential))
        .expect("valid trendline");

    c.bench_function("context_recompute_2k", |b| {
        b.iter(|| {
            chart.recompute().expect("recompute should succeed");
            let _ = chart
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_nice_interval,
    bench_numeric_labels_10k,
    bench_polynomial_fit_10k,
    bench_context_recompute_2k
);
criterion_main!(benches);
