use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const CRATE_TARGET: &str = "reindeer_maze";

/// Installs the global subscriber. Logs go to stderr so answers on stdout
/// stay clean.
///
/// An explicit `log_level` or `verbose` wins over `REINDEER_MAZE_LOG` and
/// `RUST_LOG`; without either flag those variables apply, then `warn`.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (_, Some(level)) => Some(level),
        (true, None) => Some("debug"),
        (false, None) => None,
    };
    init_with_filter(filter_for(level), log_json)
}

/// `level` is either a bare level applied to this crate or a full filter
/// directive such as `reindeer_maze::search=trace`.
fn directive(level: &str) -> EnvFilter {
    EnvFilter::new(if level.contains('=') {
        level.to_string()
    } else {
        format!("{CRATE_TARGET}={level}")
    })
}

fn filter_for(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => directive(level),
        None => EnvFilter::try_from_env("REINDEER_MAZE_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| directive("warn")),
    }
}

fn init_with_filter(filter: EnvFilter, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
