//! Tracing setup.
//!
//! Console output always; in non-debug mode a daily-rolling `app.log` is
//! written under the log directory as well.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Noisy HTTP internals are capped at `warn` in both modes.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,h2=warn";

/// Default filter directives when `RUST_LOG` is unset.
pub fn default_directives(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("{level},{QUIET_DEPENDENCIES}")
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init(debug: bool, log_dir: &Path) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));
    let console = fmt::layer().with_target(false);

    if debug {
        tracing_subscriber::registry().with(filter).with(console).init();
        return Ok(None);
    }

    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "app.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();

    Ok(Some(guard))
}
