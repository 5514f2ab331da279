//! Redirects and reloads.
//!
//! [`Response::redirect`] writes the `Location` header and status, and tags
//! the response with the source location that asked for the redirect under
//! [`DEBUG_LOCATION_HEADER`]. The location is captured at compile time with
//! `#[track_caller]`, so calls forwarded through [`Response::reload`] or
//! [`Response::reload_without_query`] still report the caller's own file and
//! line. Callers that carry their own location can use
//! [`Response::redirect_from`] instead.

use crate::errors::ResponseError;
use crate::net::{Request, Response, Uri};
use http::header::{HeaderName, HeaderValue, LOCATION};
use std::panic::Location;
use std::sync::Arc;

/// Header naming the `<file>:<line>` that issued the redirect.
pub const DEBUG_LOCATION_HEADER: &str = "x-location-sent-from";

/// See Other: the follow-up request is always a GET.
pub const DEFAULT_REDIRECT_STATUS: u16 = 303;

impl Response {
    /// Registers a hook that runs once after every redirect, once the headers
    /// are final. Typically used to stop further request processing.
    pub fn set_exit_callback(&mut self, callback: impl Fn() + Send + Sync + 'static) {
        self.exit_callback = Some(Arc::new(callback));
    }

    /// Redirects to `target` with `303 See Other`.
    #[track_caller]
    pub fn redirect(&mut self, target: impl Into<Uri>) -> Result<(), ResponseError> {
        self.redirect_with_status(target, DEFAULT_REDIRECT_STATUS)
    }

    #[track_caller]
    pub fn redirect_with_status(&mut self, target: impl Into<Uri>, status_code: u16) -> Result<(), ResponseError> {
        let sent_from = sent_from(Location::caller());
        self.redirect_from(target, status_code, &sent_from)
    }

    /// Redirect with an explicit `sent_from` debug location.
    ///
    /// Nothing is modified when `target` or `sent_from` is not a valid header
    /// value.
    pub fn redirect_from(&mut self, target: impl Into<Uri>, status_code: u16, sent_from: &str) -> Result<(), ResponseError> {
        let target = target.into();
        let location = HeaderValue::from_str(target.as_str())?;
        let debug_location = HeaderValue::from_str(sent_from)?;

        self.status_code = status_code;
        self.headers.insert(LOCATION, location);
        self.headers.insert(HeaderName::from_static(DEBUG_LOCATION_HEADER), debug_location);
        log::debug!("redirect to {target} ({status_code}) sent from {sent_from}");

        if let Some(callback) = &self.exit_callback {
            callback();
        }

        Ok(())
    }

    /// Redirects to the request URI, or `./` without a request.
    #[track_caller]
    pub fn reload(&mut self) -> Result<(), ResponseError> {
        let target = match &self.request {
            Some(request) => request.uri(),
            None => Uri::from("./"),
        };
        self.redirect(target)
    }

    /// Redirects to the request URI with its query removed, or `/` without a
    /// request.
    #[track_caller]
    pub fn reload_without_query(&mut self) -> Result<(), ResponseError> {
        let target = match &self.request {
            Some(request) => request.uri().with_query(""),
            None => Uri::from("/"),
        };
        self.redirect(target)
    }
}

/// `<file relative to the working directory>:<line>`
fn sent_from(caller: &Location<'_>) -> String {
    let cwd = std::env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default();
    relative_location(caller.file(), caller.line(), &cwd)
}

fn relative_location(file: &str, line: u32, cwd: &str) -> String {
    let file = match cwd {
        "" => file,
        cwd => file.strip_prefix(cwd).unwrap_or(file),
    };
    format!("{}:{}", file.trim_matches('/'), line)
}
