use reqwest::Client;
use tracing::warn;

use crate::{configs::LauncherConfig, error::Error, USER_AGENT};

/// Builds the client shared by every request of a [`crate::Launcher`].
pub fn build_client(config: &LauncherConfig) -> Result<Client, Error> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(config.download_timeout())
        .read_timeout(config.download_timeout());

    if config.insecure_transport {
        warn!("Insecure transport is enabled. Certificates and hostnames are not verified");
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    builder.build().map_err(Error::Client)
}
