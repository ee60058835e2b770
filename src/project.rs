use crate::error::Result;
use std::path::{Path, PathBuf};

/// Name of the directory the installer populates inside a project
pub const AGENT_OS_DIR: &str = ".agent-os";

/// The project Agent OS is installed into
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Detect the current project: the working directory the tool runs from
    pub fn detect() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn agent_os_dir(&self) -> PathBuf {
        self.root.join(AGENT_OS_DIR)
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.agent_os_dir().join("commands")
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.agent_os_dir().join("workflows")
    }

    pub fn standards_dir(&self) -> PathBuf {
        self.agent_os_dir().join("standards")
    }

    /// Resolve a settings path relative to the project root
    pub fn settings_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}
