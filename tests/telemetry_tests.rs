use chart_axes::telemetry::{init_default_tracing, init_tracing_with_filter};

#[cfg(not(feature = "telemetry"))]
#[test]
fn subscriber_setup_is_a_no_op_without_the_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_filter("chart_axes=trace"));
}

#[cfg(feature = "telemetry")]
#[test]
fn second_subscriber_install_is_refused() {
    assert!(init_tracing_with_filter("chart_axes=trace"));
    assert!(!init_default_tracing());
}
