//! Fetch-style responses: status, headers, a one-shot body and its typed views.

mod array_buffer;
mod blob;
mod body;
mod fetch;
mod form_data;
mod integrity;
pub mod json;
mod redirect;
mod request;
mod response;
pub mod status;
mod stream;
mod transport;
mod uri;

pub use array_buffer::ArrayBuffer;
pub use blob::Blob;
pub use body::{BodyBytes, BodyFuture};
pub use fetch::{fetch, fetch_with, FetchError};
pub use form_data::FormData;
pub use integrity::{check_integrity, hex_digest, SUPPORTED_ALGORITHMS};
pub use json::{JsonError, JsonObject, JsonOptions};
pub use redirect::{DEBUG_LOCATION_HEADER, DEFAULT_REDIRECT_STATUS};
pub use request::Request;
pub use response::{ExitCallback, Response};
pub use stream::Stream;
pub use transport::{Transport, TransportInfo};
pub use uri::Uri;
