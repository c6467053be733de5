//! Handler result types.

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
};
use serde::{Serialize, Serializer};

/// Body of the canned error response on the raw path.
pub const SERVER_ERROR_BODY: &str = "server error";

/// A fully specified response: headers, status and body bytes.
///
/// `status: None` means unset and is written as 200. An empty body is
/// written as no body at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawData {
    pub header: HeaderMap,
    pub status: Option<StatusCode>,
    pub body: Bytes,
}

impl RawData {
    /// A 200 (unset status) response carrying `body`.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(mut self, header: HeaderMap) -> Self {
        self.header = header;
        self
    }

    /// The plain-text `500 server error` substitute.
    pub fn server_error() -> Self {
        Self::new(SERVER_ERROR_BODY).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// What a JSON handler hands back as its body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// Pre-encoded bytes, sent verbatim when `not_json` is set.
    ///
    /// Without `not_json` they are encoded the way serde_json encodes any
    /// byte sequence: an array of numbers, `b"hi"` becoming `[104,105]`.
    /// Handlers that want base64 text must encode it into [`Payload::Text`].
    Bytes(Vec<u8>),
    /// Pre-encoded text, sent verbatim when `not_json` is set.
    Text(String),
    /// A value to encode as JSON.
    Value(T),
    /// Encodes as `null`.
    Null,
}

impl<T> Default for Payload<T> {
    fn default() -> Self {
        Payload::Null
    }
}

impl<T: Serialize> Serialize for Payload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Payload::Text(text) => serializer.serialize_str(text),
            Payload::Value(value) => value.serialize(serializer),
            Payload::Null => serializer.serialize_unit(),
        }
    }
}

/// A response expressed as a JSON value, or as pre-encoded bytes/text when
/// `not_json` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonData<T = serde_json::Value> {
    pub not_json: bool,
    pub header: HeaderMap,
    pub status: Option<StatusCode>,
    pub data: Payload<T>,
}

impl<T> Default for JsonData<T> {
    fn default() -> Self {
        Self {
            not_json: false,
            header: HeaderMap::new(),
            status: None,
            data: Payload::Null,
        }
    }
}

impl<T> JsonData<T> {
    /// `value` encoded as JSON.
    pub fn new(value: T) -> Self {
        Self {
            data: Payload::Value(value),
            ..Default::default()
        }
    }

    /// Text sent verbatim, without a JSON content type.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            not_json: true,
            data: Payload::Text(text.into()),
            ..Default::default()
        }
    }

    /// Bytes sent verbatim, without a JSON content type.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            not_json: true,
            data: Payload::Bytes(bytes.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(mut self, header: HeaderMap) -> Self {
        self.header = header;
        self
    }
}

/// User-visible body of the canned JSON error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    #[serde(rename = "error_message")]
    pub message: String,
}

impl ErrorReport {
    pub fn server_error() -> Self {
        Self {
            message: SERVER_ERROR_BODY.to_string(),
        }
    }
}

impl JsonData<ErrorReport> {
    /// The JSON `500 {"error_message":"server error"}` substitute.
    pub fn server_error() -> Self {
        JsonData::new(ErrorReport::server_error()).with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_report_shape() {
        let body = serde_json::to_string(&ErrorReport::server_error()).unwrap();
        assert_eq!(body, r#"{"error_message":"server error"}"#);
    }

    #[test]
    fn payload_serialization() {
        let text: Payload<()> = Payload::Text("hi".into());
        assert_eq!(serde_json::to_string(&text).unwrap(), r#""hi""#);

        let null: Payload<()> = Payload::Null;
        assert_eq!(serde_json::to_string(&null).unwrap(), "null");

        let bytes: Payload<()> = Payload::Bytes(vec![1, 2]);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "[1,2]");
    }

    #[test]
    fn constructors_set_not_json() {
        assert!(!JsonData::new(1).not_json);
        assert!(JsonData::<()>::text("a").not_json);
        assert!(JsonData::<()>::bytes(b"a".to_vec()).not_json);
        assert_eq!(
            JsonData::<()>::default().data,
            Payload::Null
        );
    }
}
