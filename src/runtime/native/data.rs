//! Native catalog fetching: a blocking download with byte progress, or a local file.

use crate::app_core::ingest;
use crate::model::CatalogResponse;
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    pub downloaded: u64,
    pub total: Option<u64>,
}

impl DownloadProgress {
    pub fn ratio(self) -> f64 {
        ingest::progress_ratio(self.downloaded, self.total)
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "amiibo", "amiibo-tui")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

/// User data directory holding the selection files and the log.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Downloads and parses the catalog from `endpoint`, reporting bytes as they arrive.
pub fn fetch_catalog_with_progress<F>(endpoint: &str, mut on_progress: F) -> Result<CatalogResponse>
where
    F: FnMut(DownloadProgress),
{
    info!(%endpoint, "downloading catalog");
    let client = http_client()?;
    let body = download_to_vec(&client, endpoint, &mut on_progress)?;
    debug!(bytes = body.len(), "catalog downloaded");
    let text = String::from_utf8(body).context("catalog response is not valid UTF-8")?;
    ingest::parse_catalog(&text)
}

fn download_to_vec(
    client: &reqwest::blocking::Client,
    url: &str,
    on_progress: &mut dyn FnMut(DownloadProgress),
) -> Result<Vec<u8>> {
    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        anyhow::bail!("Failed to download {}: {}", url, response.status());
    }
    let total = response.content_length();
    let mut body = Vec::with_capacity(total.unwrap_or(0) as usize);
    let mut downloaded = 0u64;
    let mut buffer = [0u8; 65536];

    on_progress(DownloadProgress { downloaded, total });

    loop {
        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&buffer[..read]);
        downloaded += read as u64;
        on_progress(DownloadProgress { downloaded, total });
    }

    Ok(body)
}

fn http_client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .user_agent(concat!("amiibo-tui/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Loads a catalog saved from the collection endpoint.
pub fn load_catalog_file(path: &Path) -> Result<CatalogResponse> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    ingest::parse_catalog(&text)
}
