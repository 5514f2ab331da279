use crate::config::FetchConfig;
use crate::net::{Request, Response, Stream, TransportInfo, Uri};
use reqwest::redirect;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Net(#[from] reqwest::Error),
}

// Loads an URL with the default configuration
pub async fn fetch(url: Url) -> Result<Response, FetchError> {
    fetch_with(url, &FetchConfig::default()).await
}

// Loads an URL and returns the fully buffered response
pub async fn fetch_with(url: Url, config: &FetchConfig) -> Result<Response, FetchError> {
    let redirects = Arc::new(AtomicU32::new(0));
    let client = build_client(config, redirects.clone())?;

    log::debug!("fetching {url}");
    let res = client.get(url.clone()).send().await?;

    // Fetch results
    let effective_url = res.url().clone();
    let status = res.status().as_u16();
    let version = res.version();
    let headers = res.headers().clone();

    // Fetch body. We don't do streaming yet
    let mut stream = Stream::new();
    stream.write(res.bytes().await?);

    let redirect_count = redirects.load(Ordering::Relaxed);
    log::debug!("fetched {effective_url}: {status}, {} bytes, {redirect_count} redirect(s)", stream.len());

    let request: Arc<dyn Request> = Arc::new(Uri::from(url));
    let mut response = Response::from_parts(status, headers, Some(request))
        .with_protocol_version(version)
        .with_body(stream);
    response.set_transport(Arc::new(TransportInfo {
        effective_url,
        redirect_count,
    }));

    Ok(response)
}

/// Client whose redirect policy stores the number of hops in `redirects`.
fn build_client(config: &FetchConfig, redirects: Arc<AtomicU32>) -> Result<reqwest::Client, FetchError> {
    let max_redirects = config.max_redirects;
    let policy = redirect::Policy::custom(move |attempt| {
        // previous() holds every URL requested so far, the original included
        let hop = attempt.previous().len();
        if max_redirects == 0 {
            attempt.stop()
        } else if hop > max_redirects {
            attempt.error(format!("too many redirects (max {max_redirects})"))
        } else {
            redirects.store(hop as u32, Ordering::Relaxed);
            attempt.follow()
        }
    });

    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .redirect(policy);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::Transport;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn reply(status: &str, headers: &[(&str, &str)], body: &str) -> String {
        let mut out = format!("HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n", body.len());
        for (name, value) in headers {
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        out.push_str("\r\n");
        out.push_str(body);
        out
    }

    async fn handle(mut socket: TcpStream) {
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
        }

        let head = String::from_utf8_lossy(&request);
        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
        let response = match path.as_str() {
            "/start" => reply("302 Found", &[("Location", "/middle")], ""),
            "/middle" => reply("301 Moved Permanently", &[("Location", "/final")], ""),
            "/final" => reply("200 OK", &[("Content-Type", "application/json")], r#"{"name":"gosub"}"#),
            "/loop" => reply("302 Found", &[("Location", "/loop")], ""),
            _ => reply("404 Not Found", &[], "nope"),
        };

        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    }

    /// Serves the fixed routes above on a random local port.
    async fn serve() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                tokio::spawn(handle(socket));
            }
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    fn config() -> FetchConfig {
        FetchConfig::builder().use_system_proxy(false).build().unwrap()
    }

    #[tokio::test]
    async fn follows_redirects_and_records_transport() {
        let base = serve().await;
        let start = base.join("/start").unwrap();

        let resp = fetch_with(start.clone(), &config()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert!(resp.ok());
        assert!(resp.redirected());
        assert_eq!(resp.transport().unwrap().redirect_count(), 2);
        assert_eq!(resp.uri().unwrap().as_str(), base.join("/final").unwrap().as_str());
        assert_eq!(resp.request().unwrap().uri().as_str(), start.as_str());
        assert_eq!(resp.content_type(), "application/json");

        let json = resp.json().await.unwrap();
        assert_eq!(json.get_string("name"), Some("gosub"));
        assert_eq!(resp.text().await, r#"{"name":"gosub"}"#);
    }

    #[tokio::test]
    async fn direct_response_is_not_redirected() {
        let base = serve().await;
        let resp = fetch_with(base.join("/missing").unwrap(), &config()).await.unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.reason_phrase().unwrap(), "Not Found");
        assert!(!resp.ok());
        assert!(!resp.redirected());
        assert_eq!(resp.text().await, "nope");
    }

    #[tokio::test]
    async fn redirect_loop_is_an_error() {
        let base = serve().await;
        let cfg = FetchConfig::builder()
            .use_system_proxy(false)
            .max_redirects(3)
            .build()
            .unwrap();

        let err = fetch_with(base.join("/loop").unwrap(), &cfg).await.unwrap_err();
        let FetchError::Net(err) = err;
        assert!(err.is_redirect());
    }

    #[tokio::test]
    async fn zero_max_redirects_returns_the_redirect() {
        let base = serve().await;
        let cfg = FetchConfig::builder()
            .use_system_proxy(false)
            .max_redirects(0)
            .build()
            .unwrap();

        let resp = fetch_with(base.join("/start").unwrap(), &cfg).await.unwrap();
        assert_eq!(resp.status(), 302);
        assert!(!resp.redirected());
        assert_eq!(resp.header_line("location"), "/middle");
    }
}
