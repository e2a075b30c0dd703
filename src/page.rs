//! Pool page fetching.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

/// Browser User-Agent; the site serves a stripped page to obvious bots.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// HTTP client tuned for scraping the pool pages.
pub fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
        .context("build http client")
}

pub fn pool_page_url(network: &str, address: &str) -> String {
    format!("https://www.geckoterminal.com/{}/pools/{}", network, address)
}

/// Fetch the rendered pool page. A non-success status means there is
/// nothing to scrape and yields `Ok(None)`; transport failures bubble up
/// to the caller, which logs and moves on to the next pool.
pub async fn fetch_pool_page(
    client: &Client,
    network: &str,
    address: &str,
) -> Result<Option<String>> {
    let url = pool_page_url(network, address);
    debug!(url, "fetching pool page");
    let response = client.get(&url).send().await.context("request pool page")?;
    let status = response.status();
    if !status.is_success() {
        warn!(%status, url, "pool page returned non-success status");
        return Ok(None);
    }
    let body = response.text().await.context("read pool page body")?;
    Ok(Some(body))
}
