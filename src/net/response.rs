//! Fetch-style HTTP response model.
//!
//! [`Response`] holds a status code, the response headers and a body stream,
//! and derives typed views of the body the way the browser Fetch API does:
//! [`text`](Response::text), [`array_buffer`](Response::array_buffer),
//! [`blob`](Response::blob), [`form_data`](Response::form_data) and
//! [`json`](Response::json).
//!
//! ## Notes
//! - The body stream is drained at most once. All views are derived from one
//!   cached future ([`body_future`](Response::body_future)), so asking for
//!   `text()` and then `json()` parses the very same bytes.
//! - Every view also has a blocking `await_*` twin for callers that are not
//!   running inside an async runtime. Both return the same values.
//! - `with_*` methods return a copy. The copy gets its own headers but shares
//!   the body, so a body drained through one copy is cached for all of them.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
//! - Reason phrases are never stored; they are looked up from the status code
//!   (see [`status`](crate::net::status)).

use crate::errors::ResponseError;
use crate::net::body::{Body, BodyFuture};
use crate::net::integrity::check_integrity;
use crate::net::json::{self, JsonError, JsonObject, JsonOptions};
use crate::net::{status, ArrayBuffer, Blob, FormData, Request, Stream, Transport, Uri};
use futures::FutureExt;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Version};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Hook run after a redirect has been written, see
/// [`Response::set_exit_callback`].
pub type ExitCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct Response {
    /// Numeric HTTP status code, `0` when never set
    pub(super) status_code: u16,
    /// Protocol version the response was received with
    pub(super) version: Version,
    /// Response headers as a case-insensitive map
    pub(super) headers: HeaderMap,
    /// Body stream and its drain cache, shared between copies
    pub(super) body: Arc<Body>,
    /// Request this response answers, if known
    pub(super) request: Option<Arc<dyn Request>>,
    /// Exchange metadata (effective URL, redirects) when fetched over the network
    pub(super) transport: Option<Arc<dyn Transport>>,
    pub(super) exit_callback: Option<ExitCallback>,
}

impl Default for Response {
    fn default() -> Self {
        Self::from_parts(0, HeaderMap::new(), None)
    }
}

impl Response {
    /// Creates an empty response with `status_code` (`0` leaves it unset).
    pub fn new(status_code: u16) -> Self {
        Self::from_parts(status_code, HeaderMap::new(), None)
    }

    pub fn from_parts(status_code: u16, headers: HeaderMap, request: Option<Arc<dyn Request>>) -> Self {
        Self {
            status_code,
            version: Version::HTTP_11,
            headers,
            body: Arc::new(Body::default()),
            request,
            transport: None,
            exit_callback: None,
        }
    }

    // ---------- Status ----------

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Alias of [`status_code`](Self::status_code).
    pub fn status(&self) -> u16 {
        self.status_code
    }

    /// Copy of this response with another status code. The reason phrase
    /// follows the new code.
    pub fn with_status(&self, code: u16) -> Self {
        let mut clone = self.clone();
        clone.status_code = code;
        clone
    }

    /// Reason phrase for the current status.
    ///
    /// Fails with [`ResponseError::UnknownStatusCode`] when the status is unset
    /// or has no phrase in the table.
    pub fn reason_phrase(&self) -> Result<&'static str, ResponseError> {
        status::reason_phrase(self.status_code).ok_or(ResponseError::UnknownStatusCode(self.status_code))
    }

    /// Reason phrase, or `None` when there is none.
    pub fn status_text(&self) -> Option<&'static str> {
        status::reason_phrase(self.status_code)
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// True when the transport followed at least one redirect. Responses
    /// without a transport were never redirected.
    pub fn redirected(&self) -> bool {
        self.transport.as_ref().is_some_and(|t| t.redirect_count() > 0)
    }

    /// Effective URL from the transport, else the request URI.
    pub fn uri(&self) -> Result<Uri, ResponseError> {
        if let Some(effective) = self.transport.as_ref().and_then(|t| t.effective_url()) {
            return Ok(effective);
        }

        self.request
            .as_ref()
            .map(|r| r.uri())
            .ok_or(ResponseError::NoUriAvailable)
    }

    /// Alias of [`uri`](Self::uri).
    pub fn url(&self) -> Result<Uri, ResponseError> {
        self.uri()
    }

    /// `Content-Type` header value, or an empty string.
    pub fn content_type(&self) -> String {
        self.first_header_value(CONTENT_TYPE).unwrap_or_default()
    }

    // ---------- Request / transport ----------

    pub fn request(&self) -> Option<&Arc<dyn Request>> {
        self.request.as_ref()
    }

    pub fn set_request(&mut self, request: Arc<dyn Request>) {
        self.request = Some(request);
    }

    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = Some(transport);
    }

    // ---------- Message ----------

    pub fn protocol_version(&self) -> Version {
        self.version
    }

    pub fn with_protocol_version(&self, version: Version) -> Self {
        let mut clone = self.clone();
        clone.version = version;
        clone
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// All values of header `name`, in received order.
    pub fn header(&self, name: &str) -> Vec<String> {
        self.headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect()
    }

    /// All values of header `name` joined with `", "`, empty when absent.
    pub fn header_line(&self, name: &str) -> String {
        self.header(name).join(", ")
    }

    /// Copy with header `name` replaced by `value`.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self, ResponseError> {
        let (name, value) = parse_header(name, value)?;
        let mut clone = self.clone();
        clone.headers.insert(name, value);
        Ok(clone)
    }

    /// Copy with `value` added to the values of header `name`.
    pub fn with_added_header(&self, name: &str, value: &str) -> Result<Self, ResponseError> {
        let (name, value) = parse_header(name, value)?;
        let mut clone = self.clone();
        clone.headers.append(name, value);
        Ok(clone)
    }

    /// Copy without header `name`.
    pub fn without_header(&self, name: &str) -> Self {
        let mut clone = self.clone();
        clone.headers.remove(name);
        clone
    }

    /// Copy reading its body from `stream`. The new body has not been consumed.
    pub fn with_body(&self, stream: Stream) -> Self {
        let mut clone = self.clone();
        clone.body = Arc::new(Body::new(stream));
        clone
    }

    fn first_header_value(&self, name: HeaderName) -> Option<String> {
        self.headers
            .get(name)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
    }

    // ---------- Body ----------

    /// Cached future over the drained body. The first call drains the stream.
    pub fn body_future(&self) -> BodyFuture {
        self.body.future()
    }

    /// True once the body stream has been drained.
    pub fn body_used(&self) -> bool {
        self.body.is_consumed()
    }

    pub fn array_buffer(&self) -> impl Future<Output = ArrayBuffer> + Send + 'static {
        self.body_future().map(|bytes| ArrayBuffer::from(&bytes[..]))
    }

    /// Body as a [`Blob`] typed with the `Content-Type` header.
    pub fn blob(&self) -> impl Future<Output = Blob> + Send + 'static {
        let mime_type = self.first_header_value(CONTENT_TYPE);
        self.body_future().map(move |bytes| Blob::new(bytes, mime_type))
    }

    /// Body parsed as `application/x-www-form-urlencoded`.
    pub fn form_data(&self) -> impl Future<Output = FormData> + Send + 'static {
        self.body_future().map(|bytes| FormData::from_urlencoded(&bytes))
    }

    /// Body parsed as JSON with the default options.
    pub fn json(&self) -> impl Future<Output = Result<JsonObject, JsonError>> + Send + 'static {
        self.json_with(JsonOptions::default())
    }

    pub fn json_with(&self, options: JsonOptions) -> impl Future<Output = Result<JsonObject, JsonError>> + Send + 'static {
        self.body_future().map(move |bytes| json::parse(&bytes, options))
    }

    /// Body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> impl Future<Output = String> + Send + 'static {
        self.body_future().map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Checks the body against a `<algorithm>-<hex digest>` integrity string.
    pub fn verify_integrity(&self, integrity: Option<String>) -> impl Future<Output = Result<(), ResponseError>> + Send + 'static {
        self.body_future().map(move |bytes| check_integrity(integrity.as_deref(), &bytes))
    }

    // ---------- Blocking body access ----------

    pub fn await_array_buffer(&self) -> ArrayBuffer {
        self.await_view(|bytes| ArrayBuffer::from(bytes), || self.array_buffer())
    }

    pub fn await_blob(&self) -> Blob {
        let mime_type = self.first_header_value(CONTENT_TYPE);
        self.await_view(|bytes| Blob::new(bytes, mime_type), || self.blob())
    }

    pub fn await_form_data(&self) -> FormData {
        self.await_view(FormData::from_urlencoded, || self.form_data())
    }

    pub fn await_json(&self) -> Result<JsonObject, JsonError> {
        self.await_json_with(JsonOptions::default())
    }

    pub fn await_json_with(&self, options: JsonOptions) -> Result<JsonObject, JsonError> {
        self.await_view(|bytes| json::parse(bytes, options), || self.json_with(options))
    }

    pub fn await_text(&self) -> String {
        self.await_view(|bytes| String::from_utf8_lossy(bytes).into_owned(), || self.text())
    }

    /// Builds a view straight from the buffered stream while nothing has been
    /// consumed, otherwise blocks on the cached future derivation.
    fn await_view<T, F>(&self, from_buffer: impl FnOnce(&[u8]) -> T, derive: impl FnOnce() -> F) -> T
    where
        F: Future<Output = T>,
    {
        match self.body.buffered() {
            Some(bytes) => from_buffer(&bytes),
            None => pollster::block_on(derive()),
        }
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ResponseError> {
    Ok((HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?))
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status_code", &self.status_code)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("has_request", &self.request.is_some())
            .field("has_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}",
            self.version,
            self.status_code,
            status::reason_phrase_or_unknown(self.status_code)
        )
    }
}
