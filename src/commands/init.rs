use crate::cli::InitCmd;
use crate::config::Config;
use crate::error::{AgentOsError, Result};
use crate::installer::{self, InstallReport};
use crate::project::Project;

/// Install Agent OS into the current project
pub fn execute(cmd: &InitCmd, verbose: bool) -> Result<InstallReport> {
    if !cmd.targets_copilot() {
        return Err(AgentOsError::UnsupportedTarget);
    }

    let project = Project::detect()?;
    let config =
        Config::load(project.root())?.with_cli_overrides(cmd.profile_dir.as_deref(), verbose);

    installer::install_for_copilot(&project, &config)
}
