use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub mod router;

#[derive(Parser, Debug)]
#[command(name = "agent-os")]
#[command(about = "Install Agent OS into the current project", long_about = None)]
#[command(version = env!("AGENT_OS_VERSION"))]
#[command(after_help = "\
EXAMPLES:
  agent-os init --github-copilot     Install for GitHub Copilot
  agent-os init --copilot -v         Same, listing every installed file

Commands are read from the Agent OS profile (default: ~/.agent-os/profiles/default).
Run 'agent-os-setup' first if Agent OS is not installed yet.")]
pub struct Cli {
    /// Print every copied and converted file
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install Agent OS commands, workflows and standards into this project
    #[command(long_about = "Install Agent OS into the current directory.\n\n\
        Copies standards and workflows into .agent-os/, converts command\n\
        templates into Copilot prompt files (.agent-os/commands/<bundle>/*.prompt.md)\n\
        and enables them in .vscode/settings.json.")]
    Init(InitCmd),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct InitCmd {
    /// Install for GitHub Copilot
    #[arg(long = "github-copilot", visible_alias = "copilot")]
    pub github_copilot: bool,

    /// Profile directory to install from (overrides config and AGENT_OS_PROFILE_DIR)
    #[arg(long = "profile-dir", value_name = "PATH")]
    pub profile_dir: Option<PathBuf>,

    /// Flags for other targets; accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub extra: Vec<String>,
}

impl InitCmd {
    /// Whether GitHub Copilot was requested anywhere on the command line.
    ///
    /// Once an unknown flag is seen every later argument lands in `extra`, so
    /// the Copilot flags are looked up there too.
    pub fn targets_copilot(&self) -> bool {
        self.github_copilot
            || self
                .extra
                .iter()
                .any(|arg| arg == "--github-copilot" || arg == "--copilot")
    }
}

/// Short usage text printed when no valid command was given
pub fn usage() -> String {
    let mut command = Cli::command();
    format!(
        "{}\n\nOptions:\n  --github-copilot    Install for GitHub Copilot\n\nRun 'agent-os --help' for more information.",
        command.render_usage()
    )
}
