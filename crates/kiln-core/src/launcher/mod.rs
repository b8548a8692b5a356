use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
};

use reqwest::Client;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, info};

use crate::{
    configs::LauncherConfig,
    descriptor::DescriptorResolver,
    document::Scanner,
    downloads::{
        download_file,
        progress::{MappedSender, ProgressSender},
        traits::{DownloadResult, DownloadStatus, Downloader},
        ArtifactMapper, LibrariesDownloader,
    },
    error::Error,
    game_paths::{is_valid_release_id, InstallationLayout},
    http::build_client,
    launch::{
        classpath::present_artifacts, natives::extract_natives, spawn, CommandSynthesizer, LaunchCommand,
        LaunchRequest, LaunchedGame,
    },
    manifest::ManifestClient,
    platform::Platform,
    repository::{descriptor::ReleaseDescriptor, release_index::ReleaseIndex},
    resolver::{native_artifacts, resolve, ResolvedArtifact},
};

pub mod progress;

use progress::{
    libraries_percent, LaunchProgress, LaunchStage, COMMAND_PERCENT, DESCRIPTOR_PERCENT, LAUNCHED_PERCENT,
    LIBRARIES_DONE_PERCENT, PRIMARY_ARTIFACT_PERCENT,
};

/// Everything needed to start a release, computed without starting it.
#[derive(Debug, Clone)]
pub struct PreparedLaunch {
    pub descriptor: ReleaseDescriptor,
    /// Every artifact the release needs on this platform.
    pub artifacts: Vec<ResolvedArtifact>,
    /// The subset of `artifacts` present on disk.
    pub installed: Vec<ResolvedArtifact>,
    pub command: LaunchCommand,
}

/// Entry point for callers: owns the HTTP client, the latest release index
/// and the installation layout.
#[derive(Debug)]
pub struct Launcher {
    config: LauncherConfig,
    layout: InstallationLayout,
    platform: Platform,
    client: Client,
    manifest: ManifestClient,
    descriptors: DescriptorResolver,
    index: RwLock<ReleaseIndex>,
    busy: AtomicBool,
}

impl Launcher {
    pub fn new(config: LauncherConfig, layout: InstallationLayout) -> Result<Self, Error> {
        let client = build_client(&config)?;
        let scanner = Scanner::new(config.bracket_matching);

        Ok(Self {
            manifest: ManifestClient::new(
                client.clone(),
                config.release_index_url.clone(),
                config.index_timeout(),
                scanner,
            ),
            descriptors: DescriptorResolver::new(client.clone(), layout.clone(), scanner),
            platform: Platform::current(),
            index: RwLock::new(ReleaseIndex::default()),
            busy: AtomicBool::new(false),
            client,
            config,
            layout,
        })
    }

    /// Overrides the host platform used for natives and command synthesis.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn layout(&self) -> &InstallationLayout {
        &self.layout
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Natives directory of `release_id` inside this launcher's layout.
    pub fn natives_dir(&self, release_id: &str) -> PathBuf {
        self.layout.natives_dir(release_id)
    }

    /// Fetches the release index and replaces the one held by the launcher.
    pub async fn fetch_release_index(&self) -> Result<ReleaseIndex, Error> {
        let index = self.manifest.fetch_index().await?;
        *self.index.write().await = index.clone();
        Ok(index)
    }

    /// The index from the last successful fetch. Empty before the first one.
    pub async fn release_index(&self) -> ReleaseIndex {
        self.index.read().await.clone()
    }

    /// Installs everything `request` needs and builds its command line.
    pub async fn prepare(
        &self,
        request: &LaunchRequest,
        progress: &dyn ProgressSender<LaunchProgress>,
    ) -> Result<PreparedLaunch, Error> {
        let _guard = BusyGuard::acquire(&self.busy)?;
        self.prepare_unguarded(request, progress).await
    }

    /// [`Launcher::prepare`], then starts the game from the installation root.
    #[tracing::instrument(skip_all, fields(release = %request.release_id))]
    pub async fn launch(
        &self,
        request: &LaunchRequest,
        progress: &dyn ProgressSender<LaunchProgress>,
    ) -> Result<LaunchedGame, Error> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let prepared = self.prepare_unguarded(request, progress).await?;
        debug!("Command: {}", prepared.command);

        let game = spawn(&prepared.command, &self.layout.root)?;

        progress
            .update(LaunchProgress::new(
                LaunchStage::Launched,
                LAUNCHED_PERCENT,
                format!("Started {}", request.release_id),
            ))
            .await;

        Ok(game)
    }

    /// Runs [`Launcher::fetch_release_index`] as its own task.
    pub fn spawn_fetch_index(self: &Arc<Self>) -> JoinHandle<Result<ReleaseIndex, Error>> {
        let launcher = Arc::clone(self);
        tokio::spawn(async move { launcher.fetch_release_index().await })
    }

    /// Runs [`Launcher::launch`] as its own task.
    pub fn spawn_launch<P>(self: &Arc<Self>, request: LaunchRequest, progress: P) -> JoinHandle<Result<LaunchedGame, Error>>
    where
        P: ProgressSender<LaunchProgress> + 'static,
    {
        let launcher = Arc::clone(self);
        tokio::spawn(async move { launcher.launch(&request, &progress).await })
    }

    #[tracing::instrument(skip_all, fields(release = %request.release_id))]
    async fn prepare_unguarded(
        &self,
        request: &LaunchRequest,
        progress: &dyn ProgressSender<LaunchProgress>,
    ) -> Result<PreparedLaunch, Error> {
        let release_id = request.release_id.as_str();

        let descriptor = self.descriptor(release_id).await?;
        progress
            .update(LaunchProgress::new(
                LaunchStage::Descriptor,
                DESCRIPTOR_PERCENT,
                format!("Loaded descriptor of {release_id}"),
            ))
            .await;

        self.primary_artifact(release_id, &descriptor).await?;
        progress
            .update(LaunchProgress::new(
                LaunchStage::PrimaryArtifact,
                PRIMARY_ARTIFACT_PERCENT,
                format!("{release_id}.jar is ready"),
            ))
            .await;

        let artifacts = resolve(&descriptor.dependencies, self.platform);
        self.libraries(&artifacts, progress).await;

        let installed = present_artifacts(&self.layout, &artifacts).await;

        let archives = native_artifacts(&installed)
            .map(|artifact| self.layout.library_path(&artifact.relative_path))
            .collect::<Vec<_>>();
        let extracted = extract_natives(archives, request.natives_dir.clone()).await?;
        progress
            .update(LaunchProgress::new(
                LaunchStage::Natives,
                LIBRARIES_DONE_PERCENT,
                format!("Extracted {extracted} native libraries"),
            ))
            .await;

        let command = CommandSynthesizer::new(&self.layout, self.platform, &self.config.java).build(
            &descriptor,
            &installed,
            request,
        );
        progress
            .update(LaunchProgress::new(
                LaunchStage::Command,
                COMMAND_PERCENT,
                format!("Command has {} arguments", command.args().len()),
            ))
            .await;

        info!(
            "{release_id} is prepared: {} of {} libraries installed",
            installed.len(),
            artifacts.len()
        );

        Ok(PreparedLaunch {
            descriptor,
            artifacts,
            installed,
            command,
        })
    }

    async fn descriptor(&self, release_id: &str) -> Result<ReleaseDescriptor, Error> {
        if !is_valid_release_id(release_id) {
            return Err(Error::InvalidReleaseId(release_id.to_owned()));
        }

        if self.descriptors.is_cached(release_id).await {
            return self.descriptors.resolve(release_id, None).await;
        }

        let known = self.index.read().await.descriptor_url(release_id).map(ToOwned::to_owned);
        let url = match known {
            Some(url) => Some(url),
            None => {
                info!("{release_id} is not in the loaded release index. Fetching it");
                self.fetch_release_index()
                    .await?
                    .descriptor_url(release_id)
                    .map(ToOwned::to_owned)
            }
        };

        self.descriptors.resolve(release_id, url.as_deref()).await
    }

    async fn primary_artifact(&self, release_id: &str, descriptor: &ReleaseDescriptor) -> Result<(), Error> {
        let path = self.layout.primary_artifact(release_id);

        if tokio::fs::try_exists(&path).await? {
            debug!("{} is already present", path.display());
            return Ok(());
        }

        download_file(&self.client, &path, &descriptor.primary_artifact_url).await?;
        info!("Downloaded {}", path.display());

        Ok(())
    }

    async fn libraries(&self, artifacts: &[ResolvedArtifact], progress: &dyn ProgressSender<LaunchProgress>) {
        if artifacts.is_empty() {
            progress
                .update(LaunchProgress::new(
                    LaunchStage::Libraries,
                    LIBRARIES_DONE_PERCENT,
                    "No libraries to download",
                ))
                .await;
            return;
        }

        let mapper = ArtifactMapper::new(&self.client, &self.layout);
        let downloader = LibrariesDownloader::new(&mapper, artifacts).delay(self.config.rate_limit());

        let total = downloader.total() as usize;
        let done = AtomicUsize::new(0);

        let sender: MappedSender<'_, DownloadResult, LaunchProgress> = MappedSender::new(progress, |result: DownloadResult| {
            let done = done.fetch_add(1, Ordering::AcqRel) + 1;
            let name = result
                .path()
                .file_name()
                .map_or_else(String::new, |name| name.to_string_lossy().into_owned());

            let message = match result.0 {
                Ok(DownloadStatus::Downloaded(_)) => format!("Downloaded {name}"),
                Ok(DownloadStatus::AlreadyPresent(_)) => format!("{name} is already present"),
                Err(_) => format!("Failed to download {name}"),
            };

            LaunchProgress::new(LaunchStage::Libraries, libraries_percent(done, total), message)
        });

        Downloader::download(Box::new(downloader), &sender).await;
    }
}

/// Holds the busy flag for as long as it lives.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, Error> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_guard_test() {
        let flag = AtomicBool::new(false);

        {
            let _guard = BusyGuard::acquire(&flag).unwrap();
            assert!(matches!(BusyGuard::acquire(&flag), Err(Error::Busy)));
        }

        assert!(BusyGuard::acquire(&flag).is_ok());
        assert!(!flag.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn invalid_release_id_is_rejected_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = LauncherConfig {
            release_index_url: "http://127.0.0.1:9/unreachable".into(),
            ..Default::default()
        };
        let launcher = Launcher::new(config, InstallationLayout::new(dir.path())).unwrap();
        let request = LaunchRequest::builder()
            .release_id("../1.20.1")
            .natives_dir(dir.path().join("natives"))
            .build();

        let result = launcher
            .prepare(&request, &crate::downloads::progress::IgnoreProgress)
            .await;

        assert!(matches!(result, Err(Error::InvalidReleaseId(_))));
        assert!(!launcher.is_busy());
    }
}
