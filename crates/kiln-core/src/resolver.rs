use std::collections::HashSet;

use tracing::{trace, warn};

use crate::{
    game_paths::is_contained,
    platform::Platform,
    repository::descriptor::{ArtifactLocation, DependencySpec},
};

/// A file to place under the libraries directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedArtifact {
    pub relative_path: String,
    pub source_url: String,
    pub is_native: bool,
}

impl ResolvedArtifact {
    fn new(location: &ArtifactLocation, is_native: bool) -> Self {
        Self {
            relative_path: location.path.clone(),
            source_url: location.url.clone(),
            is_native,
        }
    }
}

/// Flattens dependency specs into the artifacts needed on `platform`.
///
/// For every spec the generic artifact comes first, then the native one.
/// Specs with neither are skipped. Descriptor order is kept and a relative
/// path that was already emitted is not emitted again.
pub fn resolve(dependencies: &[DependencySpec], platform: Platform) -> Vec<ResolvedArtifact> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::new();

    for spec in dependencies {
        let generic = spec.generic.as_ref().map(|location| ResolvedArtifact::new(location, false));
        let native = spec
            .native_for(platform)
            .map(|location| ResolvedArtifact::new(location, true));

        if generic.is_none() && native.is_none() {
            trace!(name = ?spec.name, "No artifacts for {platform}");
            continue;
        }

        for artifact in generic.into_iter().chain(native) {
            if !is_contained(&artifact.relative_path) {
                warn!("Ignoring artifact with unsafe path `{}`", artifact.relative_path);
                continue;
            }

            if seen.insert(artifact.relative_path.clone()) {
                artifacts.push(artifact);
            }
        }
    }

    artifacts
}

/// Classpath entries among `artifacts`.
pub fn generic_artifacts(artifacts: &[ResolvedArtifact]) -> impl Iterator<Item = &ResolvedArtifact> {
    artifacts.iter().filter(|artifact| !artifact.is_native)
}

/// Archives to extract into the natives directory.
pub fn native_artifacts(artifacts: &[ResolvedArtifact]) -> impl Iterator<Item = &ResolvedArtifact> {
    artifacts.iter().filter(|artifact| artifact.is_native)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn location(path: &str) -> ArtifactLocation {
        ArtifactLocation {
            path: path.into(),
            url: format!("https://libraries.example/{path}"),
        }
    }

    fn spec(generic: Option<&str>, natives: &[(Platform, &str)]) -> DependencySpec {
        DependencySpec {
            name: None,
            generic: generic.map(location),
            natives: natives
                .iter()
                .map(|(platform, path)| (*platform, location(path)))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn selects_platform_natives() {
        let dependencies = [
            spec(Some("a/a.jar"), &[]),
            spec(
                Some("lwjgl/lwjgl.jar"),
                &[
                    (Platform::Linux, "lwjgl/lwjgl-natives-linux.jar"),
                    (Platform::Windows, "lwjgl/lwjgl-natives-windows.jar"),
                ],
            ),
            spec(None, &[(Platform::Osx, "jinput/jinput-natives-osx.jar")]),
        ];

        let linux = resolve(&dependencies, Platform::Linux);
        assert_eq!(
            linux
                .iter()
                .map(|a| (a.relative_path.as_str(), a.is_native))
                .collect::<Vec<_>>(),
            [
                ("a/a.jar", false),
                ("lwjgl/lwjgl.jar", false),
                ("lwjgl/lwjgl-natives-linux.jar", true),
            ]
        );

        let osx = resolve(&dependencies, Platform::Osx);
        assert_eq!(osx.len(), 3);
        assert_eq!(osx[2].relative_path, "jinput/jinput-natives-osx.jar");
        assert_eq!(osx[2].source_url, "https://libraries.example/jinput/jinput-natives-osx.jar");
        assert_eq!(native_artifacts(&osx).count(), 1);
        assert_eq!(generic_artifacts(&osx).count(), 2);
    }

    #[test]
    fn empty_specs_resolve_to_nothing() {
        let dependencies = [spec(None, &[]), spec(None, &[(Platform::Windows, "w.jar")])];

        assert!(resolve(&dependencies, Platform::Linux).is_empty());
    }

    #[test]
    fn duplicate_paths_collapse() {
        let dependencies = [
            spec(Some("same.jar"), &[(Platform::Linux, "same.jar")]),
            spec(Some("other.jar"), &[]),
            spec(Some("other.jar"), &[]),
        ];

        let artifacts = resolve(&dependencies, Platform::Linux);

        assert_eq!(artifacts.len(), 2);
        assert!(!artifacts[0].is_native);
        assert_eq!(artifacts[1].relative_path, "other.jar");
    }

    #[test]
    fn unsafe_paths_are_skipped() {
        let dependencies = [spec(Some("../../outside.jar"), &[]), spec(Some("ok/inside.jar"), &[])];

        let artifacts = resolve(&dependencies, Platform::Linux);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].relative_path, "ok/inside.jar");
    }
}
