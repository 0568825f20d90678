use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Installs the global `tracing` subscriber for a binary.
///
/// Honors `RUST_LOG` when set, otherwise logs at `default_level` and above.
/// Output goes to stderr so stdout stays machine-readable.
pub fn init_tracing(default_level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
