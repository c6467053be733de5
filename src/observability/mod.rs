//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Conversion layer failures
//!     → logger.rs (Logger trait, user supplied or built in)
//!
//! Service events (startup, request spans, response writes)
//!     → tracing macros
//!     → logging.rs (subscriber: filter + pretty/JSON fmt)
//! ```

pub mod logger;
pub mod logging;

pub use logger::{Logger, NoopLogger, StdLogger, StdLoggerAdapter, TracingLogger};
