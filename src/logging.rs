use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber for the binaries.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` applies (e.g. `"warn"`).
pub fn init(default_directive: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
