use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lexdannet_config::dannet::DanNetConfig;
use lexdannet_core::DatasetError;

const PROGRESS_STEP: u64 = 10 * 1024 * 1024;

/// HTTP client for the archive download
///
/// Connecting and every read are bounded by `timeout_seconds`. There is no
/// deadline on the whole transfer, so a slow but live download of a large
/// archive still completes.
pub fn http_client(
    user_agent: &str,
    timeout_seconds: u64,
) -> Result<reqwest::Client, DatasetError> {
    let timeout = Duration::from_secs(timeout_seconds);

    reqwest::Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
        .map_err(|e| DatasetError::Unavailable(format!("cannot build HTTP client: {e}")))
}

/// Make sure the DanNet archive is on disk, downloading it when absent
///
/// The download goes to a temporary file next to the target and is renamed
/// into place only once complete, so an interrupted run never leaves a
/// truncated archive behind.
pub async fn ensure_dump(
    client: &reqwest::Client,
    config: &DanNetConfig,
) -> Result<PathBuf, DatasetError> {
    let path = PathBuf::from(&config.zip_path);
    if path.exists() {
        tracing::info!("DanNet archive already on disk at {}", path.display());
        return Ok(path);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| {
        DatasetError::Unavailable(format!("cannot create {}: {e}", dir.display()))
    })?;

    download(client, &config.zip_url, &dir, &path).await?;
    Ok(path)
}

fn write_failed(dest: &Path, e: std::io::Error) -> DatasetError {
    DatasetError::Unavailable(format!("cannot write {}: {e}", dest.display()))
}

async fn download(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
    dest: &Path,
) -> Result<(), DatasetError> {
    tracing::info!("Downloading DanNet from {url}");

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DatasetError::Unavailable(format!("request to {url} failed: {e}")))?;

    if !response.status().is_success() {
        return Err(DatasetError::Unavailable(format!(
            "HTTP {} from {url}",
            response.status()
        )));
    }

    let total = response.content_length();
    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_failed(dest, e))?;
    let mut written: u64 = 0;
    let mut next_report = PROGRESS_STEP;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| DatasetError::Unavailable(format!("download from {url} interrupted: {e}")))?
    {
        temp.write_all(&chunk).map_err(|e| write_failed(dest, e))?;
        written += chunk.len() as u64;

        if written >= next_report {
            match total {
                Some(total) => {
                    tracing::info!("Downloaded {} of {} MiB", written >> 20, total >> 20)
                }
                None => tracing::info!("Downloaded {} MiB", written >> 20),
            }
            next_report += PROGRESS_STEP;
        }
    }

    temp.flush().map_err(|e| write_failed(dest, e))?;
    temp.persist(dest).map_err(|e| write_failed(dest, e.error))?;
    tracing::info!("Saved DanNet archive to {} ({} bytes)", dest.display(), written);

    Ok(())
}
