//! Tracing subscriber setup.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` directives win over `log_level`. Output goes to stderr so that
/// command output on stdout stays machine-readable; `log_format = "json"`
/// switches to one JSON object per line.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log_format == "json" {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))?;
    }

    Ok(())
}
