pub use downloaders::*;

use std::{
    ffi::OsString,
    fmt::Display,
    path::{Path, PathBuf},
};

use futures_util::stream::StreamExt;
use reqwest::{Client, Response};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, error};

pub mod downloaders;
pub mod progress;
pub mod traits;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DownloadError {
    #[error("Cannot download {url} into {}: {error}", path.display())]
    Error {
        url: String,
        path: PathBuf,
        error: String,
    },
}

impl DownloadError {
    fn new(url: &str, path: &Path, error: impl Display) -> Self {
        DownloadError::Error {
            url: url.to_owned(),
            path: path.to_path_buf(),
            error: error.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DownloadError::Error { path, .. } => path,
        }
    }
}

/// Streams `url` into `path`, creating parent directories.
///
/// The body is written to a `.part` sibling that is renamed into place once
/// the transfer completes, so `path` exists only after a full download.
/// Whether `path` already exists is the caller's concern.
pub async fn download_file(
    client: &Client,
    path: impl AsRef<Path>,
    url: impl Into<String>,
) -> Result<(), DownloadError> {
    let url = url.into();
    let path = path.as_ref();

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|err| DownloadError::new(&url, dir, err))?;
    }

    let response = client
        .get(&url)
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|err| DownloadError::new(&url, path, err))?;

    let part = part_path(path);

    let bytes = match write_body(response, &part).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Error occurred during downloading {}\nError: {err:#}", path.display());
            let _ = tokio::fs::remove_file(&part).await;
            return Err(DownloadError::new(&url, path, err));
        }
    };

    tokio::fs::rename(&part, path)
        .await
        .map_err(|err| DownloadError::new(&url, path, err))?;

    debug!("Downloaded successfully {} ({bytes} bytes)", path.display());

    Ok(())
}

async fn write_body(response: Response, path: &Path) -> anyhow::Result<u64> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    writer.flush().await?;

    Ok(written)
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
