use crate::net::Uri;

/// The request a response answers. Only its URI is needed here, for
/// [`Response::reload`](crate::net::Response::reload) and as the fallback
/// response URI.
pub trait Request: Send + Sync {
    fn uri(&self) -> Uri;
}

impl<B: Send + Sync> Request for http::Request<B> {
    fn uri(&self) -> Uri {
        Uri::from(http::Request::uri(self))
    }
}

/// A bare URI stands in for a request that carries nothing else.
impl Request for Uri {
    fn uri(&self) -> Uri {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_request_exposes_uri() {
        let req = http::Request::get("/form?step=2").body(()).unwrap();
        assert_eq!(Request::uri(&req).as_str(), "/form?step=2");
    }

    #[test]
    fn uri_is_its_own_request() {
        let uri = Uri::from("https://example.com/");
        assert_eq!(Request::uri(&uri), uri);
    }
}
