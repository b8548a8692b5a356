use std::path::PathBuf;

use tokio::task::JoinError;

use crate::downloads::DownloadError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error("`{field}` is missing in {}", path.display())]
    Parse { field: &'static str, path: PathBuf },

    #[error("`{0}` is not a valid release id")]
    InvalidReleaseId(String),

    #[error("Release `{0}` is not listed in the release index")]
    UnknownRelease(String),

    #[error("Cannot start `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Another launch is already in progress")]
    Busy,

    #[error("Cannot build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Join(#[from] JoinError),
}

impl Error {
    pub(crate) fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }
}
