use std::ffi::OsString;

/// Subcommand that switches the bootstrapper into init mode
pub const INIT_SUBCOMMAND: &str = "init";

/// What the bootstrapper should do, with the arguments to forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapMode {
    /// Download and run the base installation script
    Base(Vec<String>),
    /// Run `~/.agent-os/setup/project.sh`, installing the base first if missing
    Init(Vec<String>),
}

/// Route bootstrapper arguments to a mode.
///
/// Only `args[1]` (the first argument after the program name) is inspected.
/// Every argument is forwarded to the selected script untouched, including
/// flags such as `--help`, so the bootstrapper itself defines no options.
///
/// # Examples
///
/// ```text
/// agent-os-setup                          -> Base([])
/// agent-os-setup --claude-code --cursor   -> Base(["--claude-code", "--cursor"])
/// agent-os-setup init --github-copilot    -> Init(["--github-copilot"])
/// agent-os-setup --cursor init            -> Base(["--cursor", "init"])
/// ```
pub fn route_args<I, T>(args: I) -> BootstrapMode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut forwarded: Vec<String> = args
        .into_iter()
        .skip(1)
        .map(|arg| arg.into().to_string_lossy().into_owned())
        .collect();

    if forwarded.first().map(String::as_str) == Some(INIT_SUBCOMMAND) {
        forwarded.remove(0);
        BootstrapMode::Init(forwarded)
    } else {
        BootstrapMode::Base(forwarded)
    }
}
