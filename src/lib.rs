pub mod config;
pub mod errors;
pub mod net;

pub use config::FetchConfig;
pub use errors::ResponseError;
pub use net::*;
