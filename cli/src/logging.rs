use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{CliError, Result};

/// Install the global tracing subscriber.
///
/// Precedence: `BACON_LOG` env var, then `--log-level`, then `--verbose`
/// (debug), else warnings only. Bare levels apply to both workspace crates.
pub fn init_tracing(verbose: bool, log_level: Option<&str>, log_json: bool) -> Result<()> {
    let directives = match (verbose, log_level) {
        (_, Some(level)) => expand_level(level),
        (true, None) => expand_level("debug"),
        (false, None) => expand_level("warn"),
    };

    let filter = EnvFilter::try_from_env("BACON_LOG").unwrap_or_else(|_| EnvFilter::new(directives));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };

    result.map_err(|e| CliError::Logging(e.to_string()))
}

fn expand_level(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("bacon={level},bacon_core={level}")
    }
}
