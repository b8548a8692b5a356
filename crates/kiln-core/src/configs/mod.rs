pub mod settings;

pub use settings::LauncherConfig;
