use std::path::Path;

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "hotel-demand.log";

/// Sends tracing output to a daily rolling file under `log_dir`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_logging(log_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{default_level},hotel_demand={default_level},hyper=warn,reqwest=warn"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    Ok(guard)
}
