//! Response transport used by the conversion layer.
//!
//! # Responsibilities
//! - Define the write-side seam (`ResponseSink`) the conversions target
//! - Provide a buffered `ResponseWriter` handle that turns into an axum
//!   `Response` once the handler is done
//!
//! # Design Decisions
//! - Headers are frozen when the status line is written; later header
//!   changes are ignored, as on a real wire
//! - Writing a body without a status line commits 200 first
//! - The handle is cheap to clone so `simple` handlers can own it while
//!   the adapter keeps a copy to inspect afterwards

use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    body::Body,
    http::{header::IntoHeaderName, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Write side of one HTTP response.
pub trait ResponseSink {
    /// Replace every value of `name` with `values`.
    fn replace_header(&mut self, name: HeaderName, values: Vec<HeaderValue>);

    /// Commit the status line and the current headers.
    fn write_header(&mut self, status: StatusCode);

    /// Append body bytes, committing 200 first if nothing was committed.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// True once the status line has been committed.
    fn is_committed(&self) -> bool;
}

#[derive(Debug, Default)]
struct Buffer {
    headers: HeaderMap,
    committed: Option<(StatusCode, HeaderMap)>,
    body: Vec<u8>,
}

impl Buffer {
    fn commit(&mut self, status: StatusCode) {
        if let Some((current, _)) = &self.committed {
            tracing::warn!(
                current = %current,
                ignored = %status,
                "Superfluous write_header call"
            );
            return;
        }
        self.committed = Some((status, self.headers.clone()));
    }
}

/// Buffered response handle passed to `simple` handlers.
#[derive(Debug, Clone, Default)]
pub struct ResponseWriter {
    inner: Arc<Mutex<Buffer>>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set a header, replacing existing values.
    pub fn insert_header<K: IntoHeaderName>(&self, name: K, value: HeaderValue) {
        self.lock().headers.insert(name, value);
    }

    /// Add a header value, keeping existing ones.
    pub fn append_header<K: IntoHeaderName>(&self, name: K, value: HeaderValue) {
        self.lock().headers.append(name, value);
    }

    /// Snapshot of the headers that would be sent right now.
    pub fn headers(&self) -> HeaderMap {
        let buf = self.lock();
        match &buf.committed {
            Some((_, headers)) => headers.clone(),
            None => buf.headers.clone(),
        }
    }

    /// Status committed so far, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.lock().committed.as_ref().map(|(status, _)| *status)
    }

    /// Number of body bytes buffered so far.
    pub fn body_len(&self) -> usize {
        self.lock().body.len()
    }

    /// Drain the buffer into an axum response.
    ///
    /// An untouched writer yields an empty 200.
    pub fn take_response(&self) -> Response {
        let buf = std::mem::take(&mut *self.lock());
        let (status, headers) = buf.committed.unwrap_or((StatusCode::OK, buf.headers));

        let mut response = Response::new(Body::from(buf.body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl ResponseSink for ResponseWriter {
    fn replace_header(&mut self, name: HeaderName, values: Vec<HeaderValue>) {
        let mut buf = self.lock();
        buf.headers.remove(&name);
        for value in values {
            buf.headers.append(name.clone(), value);
        }
    }

    fn write_header(&mut self, status: StatusCode) {
        self.lock().commit(status);
    }

    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self.lock();
        if buf.committed.is_none() {
            buf.commit(StatusCode::OK);
        }
        buf.body.extend_from_slice(data);
        Ok(data.len())
    }

    fn is_committed(&self) -> bool {
        self.lock().committed.is_some()
    }
}

impl IntoResponse for ResponseWriter {
    fn into_response(self) -> Response {
        self.take_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[test]
    fn untouched_writer_is_empty_ok() {
        let writer = ResponseWriter::new();
        assert!(!writer.is_committed());

        let response = writer.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
    }

    #[test]
    fn write_commits_ok_implicitly() {
        let mut writer = ResponseWriter::new();
        writer.write(b"hello").unwrap();

        assert!(writer.is_committed());
        assert_eq!(writer.status(), Some(StatusCode::OK));
        assert_eq!(writer.body_len(), 5);
    }

    #[test]
    fn headers_freeze_at_commit() {
        let mut writer = ResponseWriter::new();
        writer.insert_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        writer.write_header(StatusCode::NOT_FOUND);
        writer.insert_header("x-late", HeaderValue::from_static("dropped"));
        writer.write_header(StatusCode::INTERNAL_SERVER_ERROR);

        let response = writer.take_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn replace_header_drops_previous_values() {
        let mut writer = ResponseWriter::new();
        writer.append_header("x-tag", HeaderValue::from_static("a"));
        writer.append_header("x-tag", HeaderValue::from_static("b"));
        writer.replace_header(
            HeaderName::from_static("x-tag"),
            vec![HeaderValue::from_static("c")],
        );

        let headers = writer.headers();
        let values: Vec<HeaderValue> = headers.get_all("x-tag").iter().cloned().collect();
        assert_eq!(values, vec![HeaderValue::from_static("c")]);
    }

    #[test]
    fn clones_share_one_buffer() {
        let writer = ResponseWriter::new();
        let mut handle = writer.clone();
        handle.write(b"shared").unwrap();

        assert_eq!(writer.body_len(), 6);
    }
}
