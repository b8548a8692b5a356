use std::time::Duration;

use itertools::Itertools;
use reqwest::Client;
use tracing::{debug, warn};

use crate::{
    downloads::{
        progress::ProgressSender,
        traits::{DownloadResult, DownloadStatus, Downloadable, Downloader},
    },
    game_paths::InstallationLayout,
    resolver::ResolvedArtifact,
};

use super::file::FileDownloader;

pub trait LibrariesMapper<L> {
    fn proceed(&self, library: &L) -> Option<FileDownloader>;
}

/// Places resolved artifacts under the layout's libraries directory.
pub struct ArtifactMapper<'a> {
    client: &'a Client,
    layout: &'a InstallationLayout,
}

impl<'a> ArtifactMapper<'a> {
    pub fn new(client: &'a Client, layout: &'a InstallationLayout) -> Self {
        Self { client, layout }
    }
}

impl LibrariesMapper<ResolvedArtifact> for ArtifactMapper<'_> {
    fn proceed(&self, library: &ResolvedArtifact) -> Option<FileDownloader> {
        Some(FileDownloader::new(
            self.client.clone(),
            library.source_url.clone(),
            self.layout.library_path(&library.relative_path),
        ))
    }
}

/// Downloads libraries one after another.
///
/// Files that already exist are reported as present without a request.
/// After every request the downloader sleeps for `delay`. A failed download
/// is logged and reported; the remaining libraries are still processed.
#[derive(Debug)]
pub struct LibrariesDownloader {
    downloads: Vec<FileDownloader>,
    delay: Duration,
}

impl LibrariesDownloader {
    pub fn new<M, L>(mapper: &M, libraries: &[L]) -> Self
    where
        M: LibrariesMapper<L>,
    {
        let downloads = libraries
            .iter()
            .filter_map(|lib| mapper.proceed(lib))
            .unique_by(|downloader| downloader.path().to_path_buf())
            .collect_vec();

        Self {
            downloads,
            delay: Duration::from_millis(100),
        }
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait::async_trait]
impl Downloader for LibrariesDownloader {
    type Data = DownloadResult;

    fn total(&self) -> u32 {
        self.downloads.len() as u32
    }

    async fn download(self: Box<Self>, sender: &dyn ProgressSender<Self::Data>) {
        let Self { downloads, delay } = *self;
        let mut failed = 0usize;

        for downloader in downloads {
            if tokio::fs::try_exists(downloader.path()).await.unwrap_or(false) {
                debug!("{} is already present", downloader.path().display());
                let path = downloader.path().to_path_buf();
                sender.update(DownloadResult(Ok(DownloadStatus::AlreadyPresent(path)))).await;
                continue;
            }

            let result = Downloadable::download(Box::new(downloader)).await;

            if let Err(err) = &result.0 {
                failed += 1;
                warn!("Skipping library. {err}");
            }

            sender.update(result).await;

            tokio::time::sleep(delay).await;
        }

        if failed == 0 {
            debug!("Finished downloading libraries");
        } else {
            warn!("Finished downloading libraries. {failed} of them are missing, the installation is partial");
        }
    }
}
