//! HTTP transport and the demo service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → handlers.rs (demo handlers, wrapped through Mif)
//!     → writer.rs (buffered response handed back to axum)
//! ```

pub mod handlers;
pub mod server;
pub mod writer;

pub use server::HttpServer;
pub use writer::{ResponseSink, ResponseWriter};
