//! Operation log sink.
//!
//! Store mutations report their outcome through a [`LogSink`] handed to the
//! service at construction time. A failing sink never fails the operation.

use mockall::automock;
use thiserror::Error;
use tracing::{Level, debug, error, info, trace, warn};

#[derive(Debug, Error)]
#[error("log sink unavailable: {0}")]
pub struct LogSinkError(pub String);

/// Receives one (level, message) record per reported outcome.
#[automock]
pub trait LogSink: Send + Sync {
    /// Records a message at the given level.
    ///
    /// # Errors
    ///
    /// Returns an error when the record could not be delivered.
    fn log(&self, level: Level, message: &str) -> Result<(), LogSinkError>;
}

/// Forwards records to the process `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, level: Level, message: &str) -> Result<(), LogSinkError> {
        match level {
            Level::ERROR => error!(target: "catalog::store", "{message}"),
            Level::WARN => warn!(target: "catalog::store", "{message}"),
            Level::INFO => info!(target: "catalog::store", "{message}"),
            Level::DEBUG => debug!(target: "catalog::store", "{message}"),
            _ => trace!(target: "catalog::store", "{message}"),
        }

        Ok(())
    }
}

/// Delivers a record, dropping it if the sink fails.
pub(crate) fn emit(sink: &dyn LogSink, level: Level, message: &str) {
    if let Err(source) = sink.log(level, message) {
        debug!("dropped {level} log record: {source}");
    }
}
