use std::path::PathBuf;

use tracing::debug;

use crate::{
    game_paths::InstallationLayout,
    platform::Platform,
    resolver::{generic_artifacts, ResolvedArtifact},
    utils::path_to_string,
};

/// Primary artifact first, then every generic artifact in resolver order.
pub fn classpath_entries(
    layout: &InstallationLayout,
    release_id: &str,
    installed: &[ResolvedArtifact],
) -> Vec<PathBuf> {
    std::iter::once(layout.primary_artifact(release_id))
        .chain(generic_artifacts(installed).map(|artifact| layout.library_path(&artifact.relative_path)))
        .collect()
}

pub fn classpath(
    layout: &InstallationLayout,
    release_id: &str,
    installed: &[ResolvedArtifact],
    platform: Platform,
) -> String {
    let entries = classpath_entries(layout, release_id, installed);
    let entries = entries.iter().map(|path| path_to_string(path));

    itertools::intersperse(entries, platform.classpath_separator().to_string()).collect::<String>()
}

/// Keeps the artifacts whose files exist under the libraries directory.
pub async fn present_artifacts(layout: &InstallationLayout, artifacts: &[ResolvedArtifact]) -> Vec<ResolvedArtifact> {
    let mut present = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let path = layout.library_path(&artifact.relative_path);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            present.push(artifact.clone());
        } else {
            debug!("{} is missing and will not be used", path.display());
        }
    }

    present
}
