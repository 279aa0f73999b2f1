use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the viewer.
///
/// Logs go to stderr so they never interleave with the rendered screen on
/// stdout. `RUST_LOG` wins over the configured level. Fails if a global
/// subscriber is already installed.
pub fn init(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
