pub const KILN_NAME: &str = "Kiln";
pub const KILN_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USER_AGENT: &str = concat!("Kiln/", env!("CARGO_PKG_VERSION"));

pub const RELEASE_INDEX_URL: &str = "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Directory names with respect to the installation root.
pub const RELEASES_DIR: &str = "releases";
pub const LIBRARIES_DIR: &str = "libraries";
pub const ASSETS_DIR: &str = "assets";
pub const NATIVES_DIR: &str = "natives";

/// Path to the settings file with respect to the installation root.
///
/// # Example
///
/// ```rust
/// # use std::path::Path;
/// # use kiln_core::SETTINGS_CONFIG;
/// let settings = Path::new("/home/user/.kiln").join(SETTINGS_CONFIG);
/// ```
pub const SETTINGS_CONFIG: &str = ".kiln/configs/Settings.toml";

/// Entry point used when a descriptor does not name one.
pub const FALLBACK_MAIN_CLASS: &str = "net.minecraft.client.main.Main";
/// Asset index used when a descriptor does not name one.
pub const LEGACY_ASSET_INDEX: &str = "legacy";

pub const FALLBACK_DISPLAY_NAME: &str = "Player";
