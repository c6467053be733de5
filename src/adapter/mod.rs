//! Conversion layer subsystem.
//!
//! # Data Flow
//! ```text
//! handler result
//!     → convert.rs (settle failures, default status, headers)
//!     → encode.rs (JSON results only: compact or prefix/indent layout)
//!     → http::writer (headers, then status line, then body)
//!     → axum Response
//! ```
//!
//! # Design Decisions
//! - `Mif` is immutable once built and cloned into every wrapped handler
//! - Failures are logged once, at the point they are replaced by a canned
//!   response

pub mod convert;
pub mod data;
pub mod encode;
pub mod error;
pub mod options;

pub use convert::{Simple, Wrap, WrapJson};
pub use data::{ErrorReport, JsonData, Payload, RawData};
pub use error::AdapterError;
pub use options::{Mif, MifBuilder, Opt};
