/// Errors raised by [`Response`](crate::net::Response) and its helpers.
///
/// JSON failures are not part of this enum: they surface unchanged as
/// [`JsonError`](crate::net::json::JsonError) from the parser.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Unsupported integrity algorithm: {0}")]
    UnsupportedIntegrityAlgorithm(String),

    #[error("Integrity mismatch for {algorithm} digest")]
    IntegrityMismatch { algorithm: String },

    #[error("Unknown status code: {0}")]
    UnknownStatusCode(u16),

    #[error("No URI available: response has neither a transport nor a request")]
    NoUriAvailable,

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}
