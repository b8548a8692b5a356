use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::downloads::{
    download_file,
    traits::{DownloadResult, DownloadStatus, Downloadable},
};

#[derive(Debug, Clone)]
pub struct FileDownloader {
    client: Client,
    url: String,
    path: PathBuf,
}

impl FileDownloader {
    pub fn new(client: Client, url: String, path: PathBuf) -> Self {
        Self { client, url, path }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl Downloadable for FileDownloader {
    type Out = DownloadResult;

    async fn download(self: Box<Self>) -> Self::Out {
        let result = download_file(&self.client, &self.path, &self.url).await;
        DownloadResult(result.map(|()| DownloadStatus::Downloaded(self.path)))
    }
}
