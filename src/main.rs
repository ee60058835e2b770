#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use agent_os::cli::{self, Cli, Commands, InitCmd};
use agent_os::{commands, error::AgentOsError};

fn main() {
    // Usage errors exit with 1, not clap's default of 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let Some(Commands::Init(cmd)) = &cli.command else {
        println!("{}", cli::usage());
        std::process::exit(1);
    };

    if !cmd.targets_copilot() {
        eprintln!("Error: {}", AgentOsError::UnsupportedTarget);
        eprintln!("Please use: agent-os init --github-copilot");
        std::process::exit(1);
    }

    if let Err(e) = run(cmd, cli.verbose) {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cmd: &InitCmd, verbose: bool) -> Result<()> {
    commands::init::execute(cmd, verbose).context("Error installing Agent OS")?;
    Ok(())
}
