use std::{path::Path, process::Stdio};

use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::{error::Error, launch::LaunchCommand};

/// A started game process.
#[derive(Debug)]
pub struct LaunchedGame {
    child: Child,
}

impl LaunchedGame {
    /// OS process id, if the process has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Waits for the process to exit and returns its exit code.
    pub async fn wait(mut self) -> Result<Option<i32>, Error> {
        let code = self.child.wait().await?.code();

        match code {
            Some(code) => info!("Game exit code: {code}"),
            None => warn!("Game was terminated by a signal"),
        }

        Ok(code)
    }
}

/// Starts `command` in `working_dir` with inherited stdio. Does not wait.
pub fn spawn(command: &LaunchCommand, working_dir: &Path) -> Result<LaunchedGame, Error> {
    let program = command.program();

    let child = Command::new(program)
        .args(command.args())
        .current_dir(working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| Error::Launch {
            program: program.to_owned(),
            source,
        })?;

    info!(pid = ?child.id(), "Started {program}");

    Ok(LaunchedGame { child })
}
