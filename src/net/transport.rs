use crate::net::Uri;
use url::Url;

/// Post-hoc metadata about the exchange that produced a response.
pub trait Transport: Send + Sync {
    /// Number of redirects followed before the final response.
    fn redirect_count(&self) -> u32;

    /// URL of the final response, after redirects.
    fn effective_url(&self) -> Option<Uri>;
}

/// Transport metadata recorded by [`fetch`](crate::net::fetch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportInfo {
    pub effective_url: Url,
    pub redirect_count: u32,
}

impl Transport for TransportInfo {
    fn redirect_count(&self) -> u32 {
        self.redirect_count
    }

    fn effective_url(&self) -> Option<Uri> {
        Some(Uri::from(&self.effective_url))
    }
}
