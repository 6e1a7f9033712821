//! Opt-in tracing bootstrap for hosts that do not configure a subscriber.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to `info` for the host and `debug` for viewport commits from this crate.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already installed.
#[cfg(feature = "telemetry")]
#[must_use]
pub fn init_default_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,loc_trend=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(not(feature = "telemetry"))]
#[must_use]
pub fn init_default_tracing() -> bool {
    false
}
