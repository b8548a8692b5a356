use std::path::Path;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::{
    document::Scanner,
    downloads::download_file,
    error::Error,
    game_paths::{is_valid_release_id, InstallationLayout},
    platform::Platform,
    repository::descriptor::{Argument, ArtifactLocation, DependencySpec, ReleaseDescriptor},
    FALLBACK_MAIN_CLASS, LEGACY_ASSET_INDEX,
};

/// Loads release descriptors, downloading them into the layout on first use.
#[derive(Debug, Clone)]
pub struct DescriptorResolver {
    client: Client,
    layout: InstallationLayout,
    scanner: Scanner,
}

impl DescriptorResolver {
    pub fn new(client: Client, layout: InstallationLayout, scanner: Scanner) -> Self {
        Self {
            client,
            layout,
            scanner,
        }
    }

    pub async fn is_cached(&self, release_id: &str) -> bool {
        tokio::fs::try_exists(self.layout.descriptor_file(release_id))
            .await
            .unwrap_or(false)
    }

    /// Returns the descriptor of `release_id`.
    ///
    /// A cached descriptor is parsed without touching the network. Otherwise
    /// it is downloaded from `descriptor_url`, stored verbatim and parsed from
    /// disk.
    #[tracing::instrument(skip(self, descriptor_url))]
    pub async fn resolve(&self, release_id: &str, descriptor_url: Option<&str>) -> Result<ReleaseDescriptor, Error> {
        if !is_valid_release_id(release_id) {
            return Err(Error::InvalidReleaseId(release_id.to_owned()));
        }

        let path = self.layout.descriptor_file(release_id);

        if self.is_cached(release_id).await {
            debug!("Using cached descriptor {}", path.display());
        } else {
            let url = descriptor_url.ok_or_else(|| Error::UnknownRelease(release_id.to_owned()))?;
            download_file(&self.client, &path, url).await?;
            info!("Descriptor of {release_id} has been downloaded");
        }

        let doc = tokio::fs::read_to_string(&path).await?;

        parse_descriptor(self.scanner, &doc, &path)
    }
}

/// Extracts a [`ReleaseDescriptor`] from descriptor text.
///
/// | field            | lookup                 | when absent                |
/// |------------------|------------------------|----------------------------|
/// | primary artifact | `downloads.client.url` | [`Error::Parse`]           |
/// | entry point      | `mainClass`            | [`FALLBACK_MAIN_CLASS`]    |
/// | asset index      | `assetIndex.id`        | [`LEGACY_ASSET_INDEX`]     |
/// | dependencies     | `libraries`            | empty                      |
/// | JVM template     | `arguments.jvm`        | empty                      |
///
/// `path` is only used for error reporting.
pub fn parse_descriptor(scanner: Scanner, doc: &str, path: &Path) -> Result<ReleaseDescriptor, Error> {
    let primary_artifact_url = scanner
        .nested_value_of(doc, &["downloads", "client", "url"])
        .ok_or_else(|| Error::Parse {
            field: "downloads.client.url",
            path: path.to_path_buf(),
        })?
        .to_owned();

    let main_class = scanner
        .value_of(doc, "mainClass")
        .unwrap_or(FALLBACK_MAIN_CLASS)
        .to_owned();

    let asset_index_id = scanner
        .nested_value_of(doc, &["assetIndex", "id"])
        .unwrap_or(LEGACY_ASSET_INDEX)
        .to_owned();

    let dependencies = scanner
        .section_of(doc, &["libraries"], '[')
        .map(|libraries| {
            scanner
                .objects(libraries)
                .map(|object| parse_dependency(scanner, object))
                .collect()
        })
        .unwrap_or_default();

    let jvm_template = scanner
        .section_of(doc, &["arguments", "jvm"], '[')
        .map(|template| parse_template(template, path))
        .unwrap_or_default();

    Ok(ReleaseDescriptor {
        primary_artifact_url,
        main_class,
        asset_index_id,
        dependencies,
        jvm_template,
    })
}

fn parse_dependency(scanner: Scanner, object: &str) -> DependencySpec {
    let natives = Platform::ALL
        .into_iter()
        .filter_map(|platform| {
            let classifier = platform.natives_classifier();
            artifact_at(scanner, object, &["downloads", "classifiers", classifier.as_str()]).map(|location| (platform, location))
        })
        .collect();

    DependencySpec {
        name: scanner.value_of(object, "name").map(ToOwned::to_owned),
        generic: artifact_at(scanner, object, &["downloads", "artifact"]),
        natives,
    }
}

/// An artifact with a missing `path` or `url` counts as absent.
fn artifact_at(scanner: Scanner, object: &str, keys: &[&str]) -> Option<ArtifactLocation> {
    let lookup = |last: &'static str| {
        let keys = keys.iter().copied().chain([last]).collect::<Vec<_>>();
        scanner.nested_value_of(object, &keys)
    };

    Some(ArtifactLocation {
        path: lookup("path")?.to_owned(),
        url: lookup("url")?.to_owned(),
    })
}

fn parse_template(template: &str, path: &Path) -> Vec<Argument> {
    let mut deserializer = serde_json::Deserializer::from_str(template);

    serde_path_to_error::deserialize(&mut deserializer).unwrap_or_else(|err| {
        warn!(
            "Ignoring malformed JVM template in {}. Path: {}. Error: {}",
            path.display(),
            err.path(),
            err.inner()
        );
        Vec::new()
    })
}
