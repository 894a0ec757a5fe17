// src/fetch/pages.rs
use anyhow::{Context, Result};
use reqwest::Client;

use super::urls;

/// Download one page of the station listing and return its raw HTML.
pub async fn fetch_listing_page(client: &Client, page: u32) -> Result<String> {
    let url = urls::listing_page_url(page);
    let html = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body from {url}"))?;
    Ok(html)
}
