use super::ScriptRunner;
use crate::error::{AgentOsError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs scripts with `bash`, streaming their output to the terminal
#[derive(Debug, Clone, Default)]
pub struct BashRunner {
    shell: Option<PathBuf>,
}

impl BashRunner {
    /// Use the `bash` found in `PATH` at run time
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific shell binary
    pub fn with_shell(shell: impl Into<PathBuf>) -> Self {
        Self {
            shell: Some(shell.into()),
        }
    }

    fn shell(&self) -> Result<PathBuf> {
        match &self.shell {
            Some(shell) => Ok(shell.clone()),
            None => which::which("bash").map_err(|_| AgentOsError::ShellNotFound),
        }
    }
}

impl ScriptRunner for BashRunner {
    /// Run a script and wait for it.
    ///
    /// # Errors
    /// Returns error if the script cannot be started, exits non-zero, or is
    /// killed by a signal.
    fn run(&self, script: &Path, args: &[String], working_dir: Option<&Path>) -> Result<()> {
        if !script.is_file() {
            return Err(AgentOsError::ScriptNotFound(script.to_path_buf()));
        }

        let mut command = Command::new(self.shell()?);
        command.arg(script).args(args);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| {
            AgentOsError::ScriptSpawn(format!("{}: {}", script.display(), e))
        })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(AgentOsError::ScriptExitCode(code)),
            None => Err(AgentOsError::ScriptTerminated),
        }
    }
}
