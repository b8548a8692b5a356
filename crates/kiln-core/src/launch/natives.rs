use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::error::Error;

const NATIVE_EXTENSIONS: [&str; 4] = [".dll", ".so", ".dylib", ".jnilib"];

/// Unpacks native libraries from `archives` into `natives_dir`.
///
/// Entries are flattened to their file names. Files that already exist are
/// left alone. An archive that cannot be read is skipped with a warning.
/// Returns the number of files written.
pub async fn extract_natives(archives: Vec<PathBuf>, natives_dir: PathBuf) -> Result<usize, Error> {
    let extracted = tokio::task::spawn_blocking(move || {
        archives
            .iter()
            .map(|archive| match extract_archive(archive, &natives_dir) {
                Ok(count) => count,
                Err(err) => {
                    warn!("Cannot extract natives from {}. Error: {err:#}", archive.display());
                    0
                }
            })
            .sum::<usize>()
    })
    .await?;

    Ok(extracted)
}

fn is_native_library(name: &str) -> bool {
    !name.starts_with("META-INF/") && NATIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Last path segment of an archive entry. Both separators count.
fn entry_file_name(name: &str) -> Option<&str> {
    name.rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
}

fn extract_archive(archive: &Path, natives_dir: &Path) -> anyhow::Result<usize> {
    let reader = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(reader)?;

    std::fs::create_dir_all(natives_dir)?;

    let names = zip
        .file_names()
        .filter(|name| is_native_library(name))
        .map(String::from)
        .collect::<Vec<_>>();

    let mut extracted = 0;

    for name in names {
        let Some(file_name) = entry_file_name(&name) else {
            warn!("Skipping native entry with unsafe name `{name}`");
            continue;
        };

        let target = natives_dir.join(file_name);
        if target.exists() {
            continue;
        }

        let part = natives_dir.join(format!("{file_name}.part"));
        let mut entry = zip.by_name(&name)?;
        let written = File::create(&part)
            .and_then(|mut out| io::copy(&mut entry, &mut out))
            .and_then(|_| std::fs::rename(&part, &target));

        if let Err(err) = written {
            let _ = std::fs::remove_file(&part);
            return Err(err.into());
        }

        debug!("Extracted {}", target.display());
        extracted += 1;
    }

    Ok(extracted)
}
