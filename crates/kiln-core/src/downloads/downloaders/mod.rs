pub use file::FileDownloader;
pub use libraries::{ArtifactMapper, LibrariesDownloader, LibrariesMapper};

pub mod file;
pub mod libraries;
