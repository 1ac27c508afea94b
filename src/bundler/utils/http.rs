//! HTTP utilities for downloading runtime archives.

use crate::bundler::error::{Error, Result};

/// Downloads a file from a URL.
///
/// Returns the file contents as a byte vector. Non-success HTTP statuses are
/// errors rather than bodies.
///
/// Used by:
/// - Auxiliary runtime acquisition (versioned runtime archives)
pub async fn download(url: &str) -> Result<Vec<u8>> {
    log::info!("Downloading {}", url);

    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let bytes = response.bytes().await.map_err(|e| Error::Download {
        url: url.to_string(),
        reason: format!("Failed to read response: {e}"),
    })?;

    log::debug!("Downloaded {} bytes from {}", bytes.len(), url);

    Ok(bytes.to_vec())
}
