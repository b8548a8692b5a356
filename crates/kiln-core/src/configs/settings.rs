use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    document::BracketMatching,
    fs::{read_toml_config, write_toml_config},
    repository::java_runner::JavaRunner,
    RELEASE_INDEX_URL,
};

/// Launcher-wide settings, stored as TOML inside the installation root.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    pub release_index_url: String,
    /// Disables certificate and hostname validation for every request.
    pub insecure_transport: bool,
    pub download_timeout_secs: u64,
    pub index_timeout_secs: u64,
    /// Pause after each library download.
    pub rate_limit_millis: u64,
    pub bracket_matching: BracketMatching,
    pub java: JavaRunner,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            release_index_url: RELEASE_INDEX_URL.to_owned(),
            insecure_transport: false,
            download_timeout_secs: 60,
            index_timeout_secs: 30,
            rate_limit_millis: 100,
            bracket_matching: BracketMatching::default(),
            java: JavaRunner::default(),
        }
    }
}

impl LauncherConfig {
    /// Reads the config at `path`, or returns the defaults if there is none.
    pub async fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        if !tokio::fs::try_exists(path).await? {
            debug!("{} does not exist. Using default settings", path.display());
            return Ok(Self::default());
        }

        read_toml_config(path).await
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        write_toml_config(self, path).await
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn index_timeout(&self) -> Duration {
        Duration::from_secs(self.index_timeout_secs)
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_millis)
    }
}
