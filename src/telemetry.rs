//! Opt-in `tracing` subscriber setup.
//!
//! Axis passes log one `debug` event per computed layout and `trace` events
//! with label counts; trendline fits log at `debug`, degraded fits and capped
//! label walks at `warn`. Hosts with their own subscriber need nothing here.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_axes=info";

/// Installs a compact global subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback directive
/// string such as `"chart_axes::axis=trace"`.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(fallback));
        let Ok(filter) = filter else {
            return false;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
