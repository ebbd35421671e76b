//! Logging init: human-readable lines on stderr.
//!
//! Without `-v` only warnings and errors are shown; with it every slot action
//! (`delete:`, `copy:`, `link:`) is logged. `RUST_LOG` overrides both.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,dci=info,dci_core=info"
    } else {
        "warn"
    }
}

/// Initialize logging to stderr.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
