//! Error sink used by the conversion layer.
//!
//! # Responsibilities
//! - Define the single-method `Logger` capability
//! - Provide the discard, println-adapter and tracing variants
//!
//! # Design Decisions
//! - Object safe so `Mif` can hold an `Arc<dyn Logger>`
//! - Messages are passed as `&dyn Display` so handler errors and fixed
//!   strings share one entry point

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

/// Receives every error the conversion layer swallows.
pub trait Logger: Send + Sync {
    /// Report one failure.
    fn error(&self, message: &dyn fmt::Display);
}

/// Discards everything. This is the default logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn error(&self, _message: &dyn fmt::Display) {}
}

/// A line-oriented text sink, the shape of a classic `println` logger.
pub trait StdLogger: Send + Sync {
    fn println(&self, line: &str);
}

impl<W> StdLogger for Mutex<W>
where
    W: Write + Send,
{
    fn println(&self, line: &str) {
        let mut out = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // A broken log sink has nowhere left to report to.
        let _ = writeln!(out, "{}", line);
    }
}

impl<F> StdLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn println(&self, line: &str) {
        self(line)
    }
}

/// Adapts a [`StdLogger`] into a [`Logger`].
#[derive(Debug)]
pub struct StdLoggerAdapter<L> {
    inner: L,
}

impl<L: StdLogger> StdLoggerAdapter<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    /// Get the wrapped sink.
    pub fn get_ref(&self) -> &L {
        &self.inner
    }
}

impl<L: StdLogger> Logger for StdLoggerAdapter<L> {
    fn error(&self, message: &dyn fmt::Display) {
        self.inner.println(&message.to_string());
    }
}

/// Forwards to `tracing::error!` so failures land in the service log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, message: &dyn fmt::Display) {
        tracing::error!(error = %message, "Request handler failed");
    }
}
