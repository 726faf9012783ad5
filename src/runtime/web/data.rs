//! Web-specific data fetching: downloads the catalog with the browser's fetch.

use crate::app_core::ingest;
use crate::model::CatalogResponse;
use anyhow::{Result, bail};
use tracing::info;

pub async fn fetch_catalog(endpoint: &str) -> Result<CatalogResponse> {
    info!(%endpoint, "downloading catalog");
    let response = reqwest::get(endpoint).await?;
    if !response.status().is_success() {
        bail!("failed to download {}: HTTP {}", endpoint, response.status());
    }

    let text = response.text().await?;
    ingest::parse_catalog(&text)
}
