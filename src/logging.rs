//! Logging initialization for the CLI.
//!
//! The library only emits `tracing` events; the binary decides where they go.
//! Logs are always written to stderr so stdout stays parseable.

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map `-v` occurrences to a level: 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` is honoured; the verbosity level is added for this crate on top.
/// With `json`, events are written as JSON lines.
pub fn init(verbosity: u8, json: bool) {
    let level = level_for(verbosity);

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Ok(directive) = format!("yarnpack={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    // try_init: a second initialisation (e.g. in tests) is not an error
    if json {
        let _ = subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init();
    } else {
        let _ = subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init();
    }
}
