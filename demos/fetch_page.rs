use anyhow::Context;
use gosub_fetch::{fetch_with, FetchConfig};
use std::time::Duration;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com/".to_string());
    let url = Url::parse(&target).with_context(|| format!("cannot parse URL {target}"))?;

    let config = FetchConfig::builder()
        .max_redirects(10)
        .timeout(Duration::from_secs(30))
        .build()?;

    let response = fetch_with(url, &config).await?;

    println!("{response}");
    println!("url:        {}", response.url()?);
    println!("redirected: {}", response.redirected());
    println!("type:       {}", response.content_type());

    // Every view below reads the same, once drained body
    let buffer = response.array_buffer().await;
    println!("bytes:      {}", buffer.byte_length());

    if response.content_type().starts_with("application/json") {
        match response.json().await {
            Ok(json) => println!("json:       {json}"),
            Err(e) => println!("json:       invalid ({e})"),
        }
    } else {
        let text = response.text().await;
        let preview: String = text.chars().take(200).collect();
        println!("preview:\n{preview}");
    }

    Ok(())
}
