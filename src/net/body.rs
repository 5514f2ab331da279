//! One-shot body cache.
//!
//! A response body may be read from its [`Stream`] only once. The first call
//! to [`Body::future`] drains the stream and wraps the bytes in an already
//! resolved, shareable future. Every later call hands out a clone of that same
//! future, so all typed views observe identical bytes no matter how often or
//! in which order they are requested.
//!
//! ## Notes
//! - The future is resolved at creation. Outside a runtime
//!   `pollster::block_on` returns immediately; inside tokio it completes on
//!   first poll. Draining never suspends.
//! - The stream sits behind a `Mutex` only so a response can move between
//!   tasks. There is no parallel access in practice.

use crate::net::Stream;
use futures::future::{self, FutureExt, Ready, Shared};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Drained body bytes, cheap to clone.
pub type BodyBytes = Arc<[u8]>;

/// Cached, already resolved future over the drained body.
pub type BodyFuture = Shared<Ready<BodyBytes>>;

#[derive(Default)]
pub struct Body {
    stream: Mutex<Stream>,
    drained: OnceLock<BodyFuture>,
}

impl Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Body")
            .field("consumed", &self.is_consumed())
            .finish_non_exhaustive()
    }
}

impl Body {
    pub fn new(stream: Stream) -> Self {
        Self {
            stream: Mutex::new(stream),
            drained: OnceLock::new(),
        }
    }

    /// Returns the cached body future, draining the stream on first use.
    pub fn future(&self) -> BodyFuture {
        self.drained
            .get_or_init(|| {
                let bytes: BodyBytes = self.stream().drain().into();
                log::trace!("drained {} body bytes", bytes.len());
                future::ready(bytes).shared()
            })
            .clone()
    }

    /// Buffered bytes not consumed yet, without draining. `None` once the
    /// stream has been drained or when nothing was written.
    pub fn buffered(&self) -> Option<BodyBytes> {
        let stream = self.stream();
        let contents = stream.contents();
        (!contents.is_empty()).then(|| contents.into())
    }

    /// True once the stream has been drained into the cache.
    pub fn is_consumed(&self) -> bool {
        self.drained.get().is_some()
    }

    fn stream(&self) -> MutexGuard<'_, Stream> {
        self.stream.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_drains_once() {
        let body = Body::new(Stream::from("payload"));
        assert!(!body.is_consumed());
        assert_eq!(body.buffered().as_deref(), Some(&b"payload"[..]));

        let first = pollster::block_on(body.future());
        assert!(body.is_consumed());
        assert_eq!(&first[..], b"payload");

        // stream is empty now, the cache still answers
        assert!(body.buffered().is_none());
        let second = pollster::block_on(body.future());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn future_is_resolved_at_creation() {
        let body = Body::new(Stream::from("x"));
        assert_eq!(body.future().now_or_never().as_deref(), Some(&b"x"[..]));
        assert_eq!(body.future().now_or_never().as_deref(), Some(&b"x"[..]));
    }

    #[test]
    fn empty_body() {
        let body = Body::default();
        assert!(body.buffered().is_none());
        assert!(pollster::block_on(body.future()).is_empty());
    }
}
