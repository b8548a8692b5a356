use std::path::{Path, PathBuf};

use super::{progress::ProgressSender, DownloadError};

#[derive(Debug, Clone)]
pub struct DownloadResult(pub Result<DownloadStatus, DownloadError>);

impl DownloadResult {
    pub fn path(&self) -> &Path {
        match &self.0 {
            Ok(status) => status.path(),
            Err(err) => err.path(),
        }
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Fetched from the remote host
    Downloaded(PathBuf),
    /// The destination existed before, nothing was fetched
    AlreadyPresent(PathBuf),
}

impl DownloadStatus {
    pub fn path(&self) -> &Path {
        match self {
            DownloadStatus::Downloaded(path) | DownloadStatus::AlreadyPresent(path) => path,
        }
    }
}

#[async_trait::async_trait]
pub trait Downloadable: Send + Sync {
    type Out: Send;

    async fn download(self: Box<Self>) -> Self::Out;
}

const _: Option<Box<dyn Downloadable<Out = DownloadResult>>> = None;

#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    type Data;

    /// Returns the number of items to download
    fn total(&self) -> u32;
    async fn download(self: Box<Self>, sender: &dyn ProgressSender<Self::Data>);
}

const _: Option<Box<dyn Downloader<Data = DownloadResult>>> = None;

#[async_trait::async_trait]
impl<T> Downloader for T
where
    T: Downloadable,
{
    type Data = T::Out;

    fn total(&self) -> u32 {
        1
    }

    async fn download(self: Box<Self>, sender: &dyn ProgressSender<Self::Data>) {
        let result = Downloadable::download(self).await;
        sender.update(result).await;
    }
}
