//! Fetches the raw iCal feed. One attempt per call, no caching; the
//! front-end's refresh cadence takes care of retries.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;

/// A hung feed should not stall the dashboard for longer than this.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used for feed fetches.
pub fn feed_client() -> Client {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Download the feed body. Any non-2xx response is an error.
pub async fn fetch_feed(client: &Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}
