use std::{path::Path, sync::Arc};

use anyhow::{bail, Context};
use kiln_core::{
    configs::LauncherConfig,
    game_paths::InstallationLayout,
    launch::LaunchRequest,
    launcher::progress::LaunchProgress,
    repository::{display_name::DisplayName, release_index::Bucket},
    Launcher,
};
use tracing::{info, warn};

use crate::args::{Cli, Command, ConfigAction};

pub async fn process_args(args: &Cli) -> anyhow::Result<()> {
    let layout = layout(args.root.as_deref())?;

    match &args.command {
        Command::Versions { bucket } => versions(layout, *bucket).await,
        Command::Launch {
            release,
            name,
            memory,
            wait,
        } => launch(layout, release, name.as_deref(), *memory, *wait).await,
        Command::Config {
            action: ConfigAction::Init { force },
        } => init_config(&layout, *force).await,
    }
}

fn layout(root: Option<&Path>) -> anyhow::Result<InstallationLayout> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => InstallationLayout::default_root().context("Cannot determine the home directory. Pass `--root`")?,
    };

    if !root.is_absolute() {
        warn!("`ROOT` is not absolute. Adding to the current dir");
    }

    Ok(InstallationLayout::new(root).make_absolute()?)
}

async fn launcher(layout: InstallationLayout) -> anyhow::Result<Launcher> {
    let config = LauncherConfig::load_or_default(layout.settings_config()).await?;
    Ok(Launcher::new(config, layout)?)
}

pub async fn versions(layout: InstallationLayout, bucket: Option<Bucket>) -> anyhow::Result<()> {
    let launcher = Arc::new(launcher(layout).await?);
    let index = launcher.spawn_fetch_index().await??;

    match bucket {
        Some(bucket) => index.buckets().get(bucket).iter().for_each(|id| println!("{id}")),
        None => {
            for (bucket, ids) in index.buckets().iter() {
                println!("{} ({}):", bucket.title(), ids.len());
                ids.iter().for_each(|id| println!("  {id}"));
            }
        }
    }

    Ok(())
}

pub async fn launch(
    layout: InstallationLayout,
    release: &str,
    name: Option<&str>,
    memory: u32,
    wait: bool,
) -> anyhow::Result<()> {
    let display_name = name.map_or_else(DisplayName::default, DisplayName::sanitize);

    let request = LaunchRequest::builder()
        .release_id(release)
        .display_name(display_name)
        .memory_budget_gib(memory)
        .natives_dir(layout.natives_dir(release))
        .build();

    let launcher = Arc::new(launcher(layout).await?);

    let (sender, mut receiver) = tokio::sync::mpsc::channel::<LaunchProgress>(16);
    let printer = tokio::spawn(async move {
        while let Some(progress) = receiver.recv().await {
            println!("{progress}");
        }
    });

    let result = launcher.spawn_launch(request, sender).await?;
    printer.await?;

    let game = result?;

    if wait {
        match game.wait().await? {
            Some(code) => info!("Game exited with code {code}"),
            None => info!("Game exited"),
        }
    }

    Ok(())
}

pub async fn init_config(layout: &InstallationLayout, force: bool) -> anyhow::Result<()> {
    let path = layout.settings_config();

    if !force && tokio::fs::try_exists(&path).await? {
        bail!("{} already exists. Use `--force` to overwrite it", path.display());
    }

    LauncherConfig::default().save(&path).await
}
