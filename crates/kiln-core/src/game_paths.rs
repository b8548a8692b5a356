use std::path::{Component, Path, PathBuf};

use crate::{ASSETS_DIR, LIBRARIES_DIR, NATIVES_DIR, RELEASES_DIR, SETTINGS_CONFIG};

/// Fixed directory roles of an installation. Directories are created lazily
/// by whoever writes into them and are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationLayout {
    pub root: PathBuf,
    pub releases: PathBuf,
    pub libraries: PathBuf,
    pub assets: PathBuf,
}

impl InstallationLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            releases: root.join(RELEASES_DIR),
            libraries: root.join(LIBRARIES_DIR),
            assets: root.join(ASSETS_DIR),
            root,
        }
    }

    /// `~/.kiln`, if a home directory can be determined.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".kiln"))
    }

    pub fn make_absolute(self) -> std::io::Result<Self> {
        if self.root.is_absolute() {
            return Ok(self);
        }

        Ok(Self::new(std::env::current_dir()?.join(self.root)))
    }

    pub fn settings_config(&self) -> PathBuf {
        self.root.join(SETTINGS_CONFIG)
    }

    pub fn release_dir(&self, release_id: &str) -> PathBuf {
        self.releases.join(release_id)
    }

    pub fn descriptor_file(&self, release_id: &str) -> PathBuf {
        self.release_dir(release_id).join(format!("{release_id}.json"))
    }

    pub fn primary_artifact(&self, release_id: &str) -> PathBuf {
        self.release_dir(release_id).join(format!("{release_id}.jar"))
    }

    pub fn natives_dir(&self, release_id: &str) -> PathBuf {
        self.release_dir(release_id).join(NATIVES_DIR)
    }

    /// Location of a dependency artifact given its `/`-separated relative path.
    pub fn library_path(&self, relative_path: &str) -> PathBuf {
        relative_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.libraries.clone(), |path, segment| path.join(segment))
    }
}

/// A relative path that stays inside the directory it is joined onto.
pub fn is_contained(relative_path: &str) -> bool {
    !relative_path.is_empty()
        && Path::new(relative_path)
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        && !relative_path.split('/').any(|segment| segment == "..")
}

/// Release ids end up as directory and file names.
pub fn is_valid_release_id(release_id: &str) -> bool {
    is_contained(release_id) && !release_id.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_test() {
        let layout = InstallationLayout::new("/games/kiln");

        assert_eq!(
            layout.descriptor_file("1.20.1"),
            Path::new("/games/kiln/releases/1.20.1/1.20.1.json")
        );
        assert_eq!(
            layout.primary_artifact("1.20.1"),
            Path::new("/games/kiln/releases/1.20.1/1.20.1.jar")
        );
        assert_eq!(
            layout.natives_dir("1.20.1"),
            Path::new("/games/kiln/releases/1.20.1/natives")
        );
        assert_eq!(
            layout.library_path("org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1.jar"),
            Path::new("/games/kiln/libraries/org/lwjgl/lwjgl/3.3.1/lwjgl-3.3.1.jar")
        );
    }

    #[test]
    fn containment_test() {
        assert!(is_contained("com/mojang/brigadier/1.0.18/brigadier-1.0.18.jar"));
        assert!(!is_contained("../../etc/passwd"));
        assert!(!is_contained("a/../../b.jar"));
        assert!(!is_contained("/abs/path.jar"));
        assert!(!is_contained(""));

        assert!(is_valid_release_id("1.20.1"));
        assert!(is_valid_release_id("rd-132211"));
        assert!(!is_valid_release_id("a/b"));
        assert!(!is_valid_release_id(".."));
    }
}
