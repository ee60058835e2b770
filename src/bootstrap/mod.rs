//! Remote bootstrap of the Agent OS base installation.
//!
//! Base mode downloads `setup/base.sh`, writes it to a temporary file, runs it
//! from the home directory and removes the file again. Init mode runs the
//! already installed `~/.agent-os/setup/project.sh`, bootstrapping the base
//! installation first when that script is missing.
//!
//! Downloaded scripts are run as-is: there is no checksum or signature check.

pub mod download;
pub mod runner;

use crate::cli::router::BootstrapMode;
use crate::error::{AgentOsError, Result};
use crate::project::AGENT_OS_DIR;
use crate::utils::path::{display_with_tilde, require_home_dir};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub use download::HttpScriptSource;
pub use runner::BashRunner;

/// Fetches a script body from a URL
pub trait ScriptSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Runs a script file with arguments and inherited standard streams
pub trait ScriptRunner {
    /// Run `script` with `args`. `working_dir` of `None` keeps the caller's.
    fn run(&self, script: &Path, args: &[String], working_dir: Option<&Path>) -> Result<()>;
}

/// Filesystem locations used while bootstrapping
#[derive(Debug, Clone)]
pub struct BootstrapPaths {
    pub home: PathBuf,
    pub temp_dir: PathBuf,
}

impl BootstrapPaths {
    pub fn detect() -> Result<Self> {
        Ok(Self {
            home: require_home_dir()?,
            temp_dir: std::env::temp_dir(),
        })
    }

    /// Base installation directory, `~/.agent-os`
    pub fn base_dir(&self) -> PathBuf {
        self.home.join(AGENT_OS_DIR)
    }

    /// Project installer left behind by the base installation
    pub fn project_script(&self) -> PathBuf {
        self.base_dir().join("setup").join("project.sh")
    }
}

pub struct Bootstrapper<S, R> {
    source: S,
    runner: R,
    paths: BootstrapPaths,
    script_url: String,
}

impl<S: ScriptSource, R: ScriptRunner> Bootstrapper<S, R> {
    pub fn new(source: S, runner: R, paths: BootstrapPaths, script_url: impl Into<String>) -> Self {
        Self {
            source,
            runner,
            paths,
            script_url: script_url.into(),
        }
    }

    pub fn run(&self, mode: &BootstrapMode) -> Result<()> {
        match mode {
            BootstrapMode::Base(args) => self.run_base(args),
            BootstrapMode::Init(args) => self.run_init(args),
        }
    }

    /// Download and run the base installation script from the home directory.
    ///
    /// The temporary script is removed whether or not it ran successfully.
    pub fn run_base(&self, args: &[String]) -> Result<()> {
        println!("Downloading Agent OS base installation script...");
        let script = self.source.fetch(&self.script_url)?;

        let temp_path = self.temp_script_path();
        let result = write_executable(&temp_path, &script)
            .and_then(|()| self.runner.run(&temp_path, args, Some(&self.paths.home)));

        if temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                eprintln!(
                    "⚠️  Warning: Failed to remove {}: {}",
                    temp_path.display(),
                    e
                );
            }
        }

        result
    }

    /// Run the local project installer, bootstrapping the base installation if needed
    pub fn run_init(&self, args: &[String]) -> Result<()> {
        let project_script = self.paths.project_script();

        if !project_script.exists() {
            println!(
                "⚠️  Base installation not found at {}",
                display_with_tilde(&self.paths.base_dir())
            );
            println!("Installing base installation first...\n");

            self.run_base(&[])?;

            if !project_script.exists() {
                return Err(AgentOsError::ScriptNotFound(project_script));
            }
            println!("\n✅ Base installation complete!\n");
        }

        self.runner.run(&project_script, args, None)
    }

    /// Unique temp path derived from the current time
    fn temp_script_path(&self) -> PathBuf {
        self.paths.temp_dir.join(format!(
            "agent-os-base-{}.sh",
            Utc::now().timestamp_millis()
        ))
    }
}

/// Write script content with mode 0755
fn write_executable(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;

    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;

    Ok(())
}
