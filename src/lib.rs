//! Adapters that turn handler results into HTTP responses.
//!
//! Handlers return raw bytes or JSON-serializable data (plus an error)
//! instead of writing to the response themselves; [`Mif`] converts the
//! result, applying default status codes, header propagation, JSON encoding
//! and a canned 500 on failure.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use mif::{JsonData, Mif};
//!
//! let mif = Mif::builder().tracing_logger().build();
//! let app: Router = Router::new().route(
//!     "/",
//!     get(mif.wrap_json(|_req| async {
//!         Ok::<_, std::io::Error>(Some(JsonData::new(serde_json::json!({"text": "test"}))))
//!     })),
//! );
//! # let _ = app;
//! ```

pub mod adapter;
pub mod config;
pub mod http;
pub mod observability;

pub use adapter::{ErrorReport, JsonData, Mif, MifBuilder, Opt, Payload, RawData};
pub use config::schema::{JsonConfig, ServiceConfig};
pub use http::{HttpServer, ResponseSink, ResponseWriter};
pub use observability::{Logger, NoopLogger, StdLogger, StdLoggerAdapter, TracingLogger};
