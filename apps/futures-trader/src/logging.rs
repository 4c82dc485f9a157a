//! Logging infrastructure.
//!
//! Two sinks share every event: a console layer whose level follows
//! `--verbose` (or `RUST_LOG` when set), and a non-blocking append-only
//! file layer writing `trading-bot.log` at info and above. Each line
//! carries timestamp, target, level, and message, so a failed run can be
//! diagnosed from the log file alone.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Append-only log file, created in the working directory.
pub const LOG_FILE: &str = "trading-bot.log";

/// Install the global subscriber.
///
/// The returned guard owns the background log writer; dropping it
/// flushes pending lines, so it must live until the process exits.
pub fn init(verbose: bool) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
        .init();

    guard
}
