//! Logging initialization.
//!
//! Structured logging via `tracing`, configured once per process. The
//! filter honors `RUST_LOG` and falls back to `info` (`debug` under
//! `--verbose`); output is pretty for terminals or JSON lines for log
//! shippers.

use crate::{Error, Result};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Options for logging initialization.
#[derive(Debug, Clone, Copy)]
pub struct InitOptions {
    /// Whether verbose output was requested via CLI.
    pub verbose: bool,
    /// Whether to emit JSON-formatted log lines.
    pub json: bool,
}

static OBSERVABILITY_INIT: OnceLock<()> = OnceLock::new();

/// Initializes logging for the process.
///
/// # Errors
///
/// Returns an error if logging has already been initialized.
pub fn init(options: InitOptions) -> Result<()> {
    if OBSERVABILITY_INIT.get().is_some() {
        return Err(already_initialized());
    }

    let default_directive = if options.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if options.json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .with(filter)
            .try_init()
            .map_err(init_error)?;
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .with(filter)
            .try_init()
            .map_err(init_error)?;
    }

    OBSERVABILITY_INIT.set(()).map_err(|()| already_initialized())
}

fn already_initialized() -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: "observability already initialized".to_string(),
    }
}

/// Helper to convert init errors.
#[allow(clippy::needless_pass_by_value)]
fn init_error(e: tracing_subscriber::util::TryInitError) -> Error {
    Error::OperationFailed {
        operation: "observability_init".to_string(),
        cause: e.to_string(),
    }
}
