use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kiln_core::repository::release_index::Bucket;

#[derive(Parser)]
#[command(verbatim_doc_comment)]
///     __ __ _ __
///    / //_/(_) /___
///   / ,<  / / / __ \
///  / /| |/ / / / / /
/// /_/ |_/_/_/_/ /_/
/// Offline launcher CLI
pub struct Cli {
    /// Installation root. Defaults to `~/.kiln`
    #[arg(long, short = 'r', global = true)]
    pub root: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show releases from the release index
    Versions {
        /// Only list this bucket (latest-release, latest-snapshot, release, snapshot, old-beta, old-alpha)
        #[arg(long, short)]
        bucket: Option<Bucket>,
    },
    /// Install a release if needed and start it
    Launch {
        /// Release id, e.g. 1.20.1
        release: String,
        /// Display name. Invalid names fall back to `Player`
        #[arg(long, short)]
        name: Option<String>,
        /// Memory ceiling in GiB
        #[arg(long, short, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        memory: u32,
        /// Wait for the game to exit
        #[arg(long, short)]
        wait: bool,
    },
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Write the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_must_be_positive() {
        assert!(Cli::try_parse_from(["kiln", "launch", "1.20.1", "--memory", "0"]).is_err());

        let cli = Cli::try_parse_from(["kiln", "launch", "1.20.1", "--memory", "4"]).unwrap();
        assert!(matches!(cli.command, Command::Launch { memory: 4, .. }));

        let cli = Cli::try_parse_from(["kiln", "launch", "1.20.1"]).unwrap();
        assert!(matches!(cli.command, Command::Launch { memory: 2, .. }));
    }
}
