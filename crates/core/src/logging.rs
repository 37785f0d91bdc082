//! Logging infrastructure.
//!
//! Initializes the tracing subscriber. Logs go to stderr; stdout is
//! reserved for data output (generated circuit text, JSON results), so
//! query results stay pipeable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// The filter comes from `log_level` if given, then `RUST_LOG`, then
/// `info`. ANSI colors are suppressed when `no_color` is set or the
/// `NO_COLOR` environment variable is present.
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let filter = match log_level {
        Some(level) => EnvFilter::try_new(level),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
    .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(ansi),
        )
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging() {
        // The subscriber can only be installed once per process; a second
        // call errors, and either outcome is fine here.
        let result = init_logging(Some("debug"), true);
        assert!(result.is_ok() || result.is_err());
    }
}
