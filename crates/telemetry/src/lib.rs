use std::{fs::File, io, path::PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Default)]
pub struct TelemetryConfig {
    /// Mirror log output into this file, in addition to the console.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("could not create log file at {path}")]
    CreateLogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Keeps the background log writer alive. Dropping the guard flushes and
/// stops file logging, so hold it for the lifetime of the process.
pub struct TelemetryGuard {
    _file_writer: Option<WorkerGuard>,
}

pub fn install(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let (file_layer, file_guard) = match &config.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| TelemetryError::CreateLogFile {
                path: path.clone(),
                source,
            })?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            let layer = fmt::layer()
                .pretty()
                .with_ansi(false)
                .without_time()
                .with_writer(writer);

            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(filter_layer)
        .with(file_layer)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(true)
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    Ok(TelemetryGuard {
        _file_writer: file_guard,
    })
}
