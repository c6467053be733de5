//! Errors raised inside the conversion layer.
//!
//! None of these reach the code that registered a handler; they are logged
//! and turned into a canned response.

use thiserror::Error;

/// Message for a `not_json` payload that is neither bytes nor text.
pub const BAD_NOT_JSON: &str = r#"bad "not json" data, expected "[]byte" or "string""#;

/// Message logged when a handler returns no result and no error.
pub const DATA_IS_NIL: &str = "data is nil";

#[derive(Debug, Error)]
pub enum AdapterError {
    /// The payload could not be represented as JSON.
    #[error("json encode: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// `not_json` was set on a payload that is neither bytes nor text.
    #[error("{}", BAD_NOT_JSON)]
    BadNotJson,

    /// The handler returned neither a result nor an error.
    #[error("{}", DATA_IS_NIL)]
    MissingData,

    /// The status line went out but the body did not.
    #[error("write response: {0}")]
    Write(#[source] std::io::Error),
}
