use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Route tracing output through the test harness.
///
/// Filtered by `RUST_LOG` (nothing is printed when it is unset), and captured
/// per test so only failing tests show their logs. Safe to call from every
/// test; only the first call in a process installs the subscriber.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let fmt_layer = fmt::layer()
        .with_test_writer()
        .with_target(true)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
