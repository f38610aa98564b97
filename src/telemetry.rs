//! Telemetry helpers for hosts embedding `ohlc-chart`.
//!
//! The crate only emits `tracing` events. Installing a subscriber is left to
//! the host, either through `init_default_tracing` or its own setup.

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,ohlc_chart=debug";

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds and `false` when the feature is
/// disabled or the host already installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
