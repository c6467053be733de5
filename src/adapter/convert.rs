//! The three conversions from handler results to HTTP responses.
//!
//! # Responsibilities
//! - `simple`: handler writes its own response; failures become a plain 500
//! - `wrap`: handler returns `RawData`; headers, status and body are written
//! - `wrap_json`: handler returns `JsonData`; it is encoded and written as `wrap`
//!
//! # Design Decisions
//! - Errors stop here: they are logged through the configured `Logger` and
//!   replaced by a canned response, never returned to the router
//! - Every wrapped handler is an `axum::handler::Handler`, mountable with
//!   `get`, `post`, `any` and friends
//! - JSON encode failures flow into the raw failure path (logged, plain 500)

use std::future::Future;
use std::pin::Pin;

use axum::{
    body::Bytes,
    extract::Request,
    handler::Handler,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    BoxError,
};
use serde::Serialize;

use crate::adapter::data::{JsonData, Payload, RawData, SERVER_ERROR_BODY};
use crate::adapter::encode;
use crate::adapter::error::AdapterError;
use crate::adapter::options::Mif;
use crate::http::writer::{ResponseSink, ResponseWriter};

type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Handler that writes its own response. See [`Mif::simple`].
#[derive(Clone, Debug)]
pub struct Simple<F> {
    mif: Mif,
    next: F,
}

/// Handler returning [`RawData`]. See [`Mif::wrap`].
#[derive(Clone, Debug)]
pub struct Wrap<F> {
    mif: Mif,
    next: F,
}

/// Handler returning [`JsonData`]. See [`Mif::wrap_json`].
#[derive(Clone, Debug)]
pub struct WrapJson<F> {
    mif: Mif,
    next: F,
}

impl Mif {
    /// Wrap a handler that writes to a [`ResponseWriter`] itself.
    ///
    /// When it fails, the error is logged and, unless a status line already
    /// went out, the response becomes `500 server error`. Only the status
    /// line counts: a handler that wrote `404` with no body and then failed
    /// still answers an empty `404`.
    pub fn simple<F, Fut, E>(&self, next: F) -> Simple<F>
    where
        F: Fn(Request, ResponseWriter) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<BoxError>,
    {
        Simple {
            mif: self.clone(),
            next,
        }
    }

    /// Wrap a handler that describes its response as [`RawData`].
    pub fn wrap<F, Fut, E>(&self, next: F) -> Wrap<F>
    where
        F: Fn(Request) -> Fut,
        Fut: Future<Output = Result<Option<RawData>, E>>,
        E: Into<BoxError>,
    {
        Wrap {
            mif: self.clone(),
            next,
        }
    }

    /// Wrap a handler that describes its response as [`JsonData`].
    pub fn wrap_json<F, Fut, T, E>(&self, next: F) -> WrapJson<F>
    where
        F: Fn(Request) -> Fut,
        Fut: Future<Output = Result<Option<JsonData<T>>, E>>,
        T: Serialize,
        E: Into<BoxError>,
    {
        WrapJson {
            mif: self.clone(),
            next,
        }
    }

    /// Settle a `simple` handler outcome on `sink`.
    ///
    /// The canned 500 is written only while `sink` is uncommitted.
    pub fn finish_simple<W, E>(&self, sink: &mut W, result: Result<(), E>)
    where
        W: ResponseSink + ?Sized,
        E: Into<BoxError>,
    {
        let Err(err) = result else {
            return;
        };
        let err: BoxError = err.into();
        self.log(&err);

        if sink.is_committed() {
            return;
        }
        sink.write_header(StatusCode::INTERNAL_SERVER_ERROR);
        if let Err(e) = sink.write(SERVER_ERROR_BODY.as_bytes()) {
            self.log(&AdapterError::Write(e));
        }
    }

    /// Resolve a raw handler outcome to the data that will be written.
    pub fn settle_raw<E>(&self, result: Result<Option<RawData>, E>) -> RawData
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(Some(data)) => data,
            Ok(None) => {
                self.log(&AdapterError::MissingData);
                RawData::server_error()
            }
            Err(err) => {
                let err: BoxError = err.into();
                self.log(&err);
                RawData::server_error()
            }
        }
    }

    /// Write `data` to `sink`: headers, then status (200 when unset), then
    /// body. A failed body write is logged and otherwise ignored.
    pub fn write_raw<W>(&self, sink: &mut W, data: RawData)
    where
        W: ResponseSink + ?Sized,
    {
        let RawData {
            header,
            status,
            body,
        } = data;

        for name in header.keys() {
            let values = header.get_all(name).iter().cloned().collect();
            sink.replace_header(name.clone(), values);
        }

        let status = status.unwrap_or(StatusCode::OK);
        sink.write_header(status);
        if let Err(e) = sink.write(&body) {
            self.log(&AdapterError::Write(e));
            return;
        }

        tracing::debug!(status = %status, bytes = body.len(), "Response written");
    }

    /// Reduce a JSON handler outcome to raw data.
    ///
    /// Handler failures and absent results are logged here and replaced by
    /// the JSON error report. An `Err` comes back only when the payload
    /// cannot be encoded.
    pub fn reduce_json<T, E>(
        &self,
        result: Result<Option<JsonData<T>>, E>,
    ) -> Result<RawData, AdapterError>
    where
        T: Serialize,
        E: Into<BoxError>,
    {
        let data = match result {
            Ok(Some(data)) => data,
            Ok(None) => {
                self.log(&AdapterError::MissingData);
                return self.encode_json(JsonData::server_error());
            }
            Err(err) => {
                let err: BoxError = err.into();
                self.log(&err);
                return self.encode_json(JsonData::server_error());
            }
        };

        if !data.not_json {
            return self.encode_json(data);
        }

        let JsonData {
            header,
            status,
            data: payload,
            ..
        } = data;
        let body: Bytes = match payload {
            Payload::Bytes(bytes) => bytes.into(),
            Payload::Text(text) => text.into(),
            Payload::Value(_) | Payload::Null => {
                if !self.disable_panic {
                    panic!("{}", AdapterError::BadNotJson);
                }
                self.log(&AdapterError::BadNotJson);
                return self.encode_json(JsonData::server_error());
            }
        };

        Ok(RawData {
            header,
            status,
            body,
        })
    }

    fn encode_json<T: Serialize>(&self, data: JsonData<T>) -> Result<RawData, AdapterError> {
        let JsonData {
            mut header,
            status,
            data: payload,
            ..
        } = data;

        let has_content_type = header
            .get(CONTENT_TYPE)
            .is_some_and(|value| !value.is_empty());
        if !has_content_type {
            header.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = encode::to_vec(&payload, &self.json)?;
        Ok(RawData {
            header,
            status,
            body: body.into(),
        })
    }
}

impl<F, Fut, E, S> Handler<(), S> for Simple<F>
where
    F: Fn(Request, ResponseWriter) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
    S: Send + Sync + 'static,
{
    type Future = ResponseFuture;

    fn call(self, req: Request, _state: S) -> Self::Future {
        Box::pin(async move {
            let mut writer = ResponseWriter::new();
            let result = (self.next)(req, writer.clone()).await;
            self.mif.finish_simple(&mut writer, result);
            writer.into_response()
        })
    }
}

impl<F, Fut, E, S> Handler<(), S> for Wrap<F>
where
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<RawData>, E>> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
    S: Send + Sync + 'static,
{
    type Future = ResponseFuture;

    fn call(self, req: Request, _state: S) -> Self::Future {
        Box::pin(async move {
            let result = (self.next)(req).await;
            let data = self.mif.settle_raw(result);

            let mut writer = ResponseWriter::new();
            self.mif.write_raw(&mut writer, data);
            writer.into_response()
        })
    }
}

impl<F, Fut, T, E, S> Handler<(), S> for WrapJson<F>
where
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<JsonData<T>>, E>> + Send + 'static,
    T: Serialize + Send + 'static,
    E: Into<BoxError> + Send + 'static,
    S: Send + Sync + 'static,
{
    type Future = ResponseFuture;

    fn call(self, req: Request, _state: S) -> Self::Future {
        Box::pin(async move {
            let result = (self.next)(req).await;
            let reduced = self.mif.reduce_json(result).map(Some);
            let data = self.mif.settle_raw(reduced);

            let mut writer = ResponseWriter::new();
            self.mif.write_raw(&mut writer, data);
            writer.into_response()
        })
    }
}
