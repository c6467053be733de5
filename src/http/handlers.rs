//! Demo handlers mounted by the service, one per conversion style.

use std::collections::BTreeMap;
use std::io;

use axum::{
    body::to_bytes,
    extract::{Query, Request},
    http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, StatusCode},
    BoxError,
};
use serde::Serialize;

use crate::adapter::{JsonData, RawData};
use crate::http::writer::{ResponseSink, ResponseWriter};

/// Largest request body the echo handler will read.
pub const MAX_ECHO_BYTES: usize = 64 * 1024;

/// `simple`: liveness probe writing its own plain-text reply.
pub async fn health(_req: Request, mut w: ResponseWriter) -> io::Result<()> {
    w.insert_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    w.write_header(StatusCode::OK);
    w.write(b"ok")?;
    Ok(())
}

/// `wrap`: returns the request body unchanged, with its content type.
pub async fn echo(req: Request) -> Result<Option<RawData>, axum::Error> {
    let content_type = req.headers().get(CONTENT_TYPE).cloned();
    let body = to_bytes(req.into_body(), MAX_ECHO_BYTES).await?;

    let mut header = HeaderMap::new();
    if let Some(value) = content_type {
        header.insert(CONTENT_TYPE, value);
    }
    Ok(Some(RawData::new(body).with_header(header)))
}

#[derive(Debug, Serialize)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
    pub query: BTreeMap<String, String>,
    pub headers: usize,
}

/// `wrap_json`: describes the request as JSON.
///
/// A query that does not decode ends in the canned JSON 500.
pub async fn inspect(req: Request) -> Result<Option<JsonData<RequestInfo>>, BoxError> {
    let Query(query) = Query::<BTreeMap<String, String>>::try_from_uri(req.uri())?;

    Ok(Some(JsonData::new(RequestInfo {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query,
        headers: req.headers().len(),
    })))
}

/// `wrap_json` with `not_json`: a plain-text greeting.
pub async fn greeting(_req: Request) -> Result<Option<JsonData>, io::Error> {
    let mut header = HeaderMap::new();
    header.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    Ok(Some(JsonData::text("hello from mif\n").with_header(header)))
}

/// `wrap_json`: always fails, showing the canned JSON error response.
pub async fn broken(_req: Request) -> Result<Option<JsonData>, io::Error> {
    Err(io::Error::other("demo handler failure"))
}
